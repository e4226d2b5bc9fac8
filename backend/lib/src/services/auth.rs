//! Sign-in service: challenge issuance and login.
//!
//! The login path is the only state transition in the auth flow. Verification
//! itself is pure (see [`crate::siwe`]); this service runs it and, only on
//! success, performs the identity upsert. A verification failure therefore
//! leaves no trace in the database or the session.

use std::sync::Arc;

use alloy_core::primitives::Address;
use tracing::{info, warn};

use super::receive::ReceiveAddressProvider;
use crate::error::Error;
use crate::repository::{User, WalletOperations};
use crate::siwe;

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    /// The verified signer address
    pub address: Address,
    /// Chain ID asserted in the verified message
    pub chain_id: u64,
}

pub struct AuthService {
    repository: Arc<dyn WalletOperations>,
    receive: Arc<dyn ReceiveAddressProvider>,
}

impl AuthService {
    pub fn new(
        repository: Arc<dyn WalletOperations>,
        receive: Arc<dyn ReceiveAddressProvider>,
    ) -> Self {
        Self {
            repository,
            receive,
        }
    }

    /// Issue a fresh challenge nonce. The caller stores it in the session.
    pub fn challenge(&self) -> String {
        siwe::generate_nonce()
    }

    /// Verify the signed message against the session nonce and upsert the
    /// wallet identity.
    pub async fn login(
        &self,
        message: &str,
        signature: &str,
        session_nonce: Option<&str>,
    ) -> Result<LoginOutcome, Error> {
        let verified =
            siwe::verify_message(message, signature, session_nonce).map_err(|err| {
                warn!(error = %err, "sign-in verification failed");
                Error::from(err)
            })?;

        let (user, created) = self
            .repository
            .upsert_user_by_wallet(&verified.address.to_string(), self.receive.generate())
            .await?;

        if created {
            info!(user_id = user.id, "created user for new wallet");
        }

        Ok(LoginOutcome {
            user,
            address: verified.address,
            chain_id: verified.chain_id,
        })
    }
}
