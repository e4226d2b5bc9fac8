//! HTTP handlers for the wallet demo API

pub mod auth;
pub mod health;
pub mod ledger;
pub mod users;

use alloy_core::primitives::Address;
use axum_extra::extract::cookie::SignedCookieJar;

pub use auth::{logout, nonce, verify};
pub use health::health_check;
pub use ledger::{balances, create_deposit, create_withdrawal, list_withdrawals, seed_deposits};
pub use users::{create_user, profile};

use crate::error::Error;
use crate::session::SessionData;

/// Resolve the authenticated wallet address from the session cookie.
pub(crate) fn require_auth(jar: &SignedCookieJar) -> Result<Address, Error> {
    let session = SessionData::load(jar);
    session
        .address
        .filter(|_| session.is_logged_in)
        .ok_or_else(|| Error::Unauthorized("Not authenticated".to_string()))
}
