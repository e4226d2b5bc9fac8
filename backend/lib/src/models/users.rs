use serde::{Deserialize, Serialize};

use super::ledger::DepositRecord;

/// Profile of a wallet-authenticated user, including deposit history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub address: String,
    pub btc_address: String,
    pub eth_address: String,
    pub deposits: Vec<DepositRecord>,
}

/// Body of the federated create/login request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub uid: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedUserResponse {
    pub id: i64,
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub btc_address: String,
    pub eth_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub success: bool,
    /// True when this request created the user, false for a repeat login
    pub created: bool,
    pub user: FederatedUserResponse,
}
