use alloy_core::primitives::Address;
use serde::{Deserialize, Serialize};

/// Body of the challenge response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonceResponse {
    pub nonce: String,
}

/// Body of the verify request.
///
/// Both fields are optional so that a missing field surfaces as the API's
/// "Missing message or signature" error instead of a deserialization reject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub message: Option<String>,
    pub signature: Option<String>,
}

/// Body of a successful verify response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub address: Address,
}
