//! Row types mapped to the database schema.
//!
//! These are storage-level representations; currency and status are kept as
//! plain strings here and parsed into typed enums at the model layer.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{deposits, users, withdrawals};

#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i64,
    /// Set for wallet-authenticated users, unique
    pub wallet_address: Option<String>,
    /// Set for federated users, unique
    pub uid: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub display_name: Option<String>,
    pub btc_address: String,
    pub eth_address: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = deposits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Deposit {
    pub id: i64,
    pub user_id: i64,
    pub currency: String,
    pub amount: BigDecimal,
    pub status: String,
    pub tx_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = withdrawals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Withdrawal {
    pub id: i64,
    pub user_id: i64,
    pub currency: String,
    pub amount: BigDecimal,
    pub destination: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
