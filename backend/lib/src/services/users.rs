//! User profile and federated identity service.

use std::sync::Arc;

use alloy_core::primitives::Address;
use tracing::info;

use super::ledger::LedgerService;
use super::receive::ReceiveAddressProvider;
use crate::error::Error;
use crate::models::users::{CreateUserRequest, CreateUserResponse, FederatedUserResponse, UserResponse};
use crate::repository::{NewFederatedUser, User, WalletOperations};

pub struct UserService {
    repository: Arc<dyn WalletOperations>,
    receive: Arc<dyn ReceiveAddressProvider>,
    ledger: Arc<LedgerService>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn WalletOperations>,
        receive: Arc<dyn ReceiveAddressProvider>,
        ledger: Arc<LedgerService>,
    ) -> Self {
        Self {
            repository,
            receive,
            ledger,
        }
    }

    /// Profile of a wallet-authenticated user with their deposit history.
    pub async fn profile(&self, address: &Address) -> Result<UserResponse, Error> {
        let wallet = address.to_string();
        let user = self
            .repository
            .get_user_by_wallet(&wallet)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        let deposits = self.ledger.deposits(user.id).await?;

        Ok(UserResponse {
            address: wallet,
            btc_address: user.btc_address,
            eth_address: user.eth_address,
            deposits,
        })
    }

    /// Database id of the wallet user, if they exist.
    pub async fn user_id_by_wallet(&self, address: &Address) -> Result<Option<i64>, Error> {
        let user = self
            .repository
            .get_user_by_wallet(&address.to_string())
            .await?;
        Ok(user.map(|u| u.id))
    }

    /// Find-or-create a federated (uid-keyed) user. First-time creation seeds
    /// the demo deposit history.
    pub async fn create_federated(
        &self,
        request: CreateUserRequest,
    ) -> Result<CreateUserResponse, Error> {
        let uid = request
            .uid
            .filter(|uid| !uid.is_empty())
            .ok_or_else(|| Error::BadRequest("User ID is required".to_string()))?;

        let (user, created) = self
            .repository
            .upsert_user_by_uid(
                NewFederatedUser {
                    uid,
                    email: request.email,
                    phone_number: request.phone_number,
                    display_name: request.display_name,
                },
                self.receive.generate(),
            )
            .await?;

        if created {
            info!(user_id = user.id, "created federated user, seeding demo history");
            self.ledger.seed_demo_history(user.id).await?;
        }

        Ok(CreateUserResponse {
            success: true,
            created,
            user: federated_response(user)?,
        })
    }
}

fn federated_response(user: User) -> Result<FederatedUserResponse, Error> {
    let uid = user.uid.ok_or(Error::Internal)?;
    Ok(FederatedUserResponse {
        id: user.id,
        uid,
        email: user.email,
        display_name: user.display_name,
        btc_address: user.btc_address,
        eth_address: user.eth_address,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::test::users::{TEST_DISPLAY_NAME, TEST_EMAIL, TEST_UID};
    use crate::repository::MockRepository;
    use crate::services::receive::MockAddressProvider;

    fn service() -> UserService {
        let repository: Arc<dyn WalletOperations> = Arc::new(MockRepository::new());
        let ledger = Arc::new(LedgerService::new(repository.clone()));
        UserService::new(repository, Arc::new(MockAddressProvider), ledger)
    }

    fn create_request() -> CreateUserRequest {
        CreateUserRequest {
            uid: Some(TEST_UID.to_string()),
            email: Some(TEST_EMAIL.to_string()),
            phone_number: None,
            display_name: Some(TEST_DISPLAY_NAME.to_string()),
        }
    }

    #[tokio::test]
    async fn create_federated_requires_uid() {
        let service = service();

        for uid in [None, Some(String::new())] {
            let err = service
                .create_federated(CreateUserRequest {
                    uid,
                    email: None,
                    phone_number: None,
                    display_name: None,
                })
                .await
                .unwrap_err();
            assert!(matches!(err, Error::BadRequest(msg) if msg == "User ID is required"));
        }
    }

    #[tokio::test]
    async fn first_federated_login_creates_and_seeds() {
        let service = service();

        let response = service.create_federated(create_request()).await.unwrap();
        assert!(response.success);
        assert!(response.created);
        assert_eq!(response.user.uid, TEST_UID);
        assert_eq!(response.user.email.as_deref(), Some(TEST_EMAIL));
        assert!(!response.user.btc_address.is_empty());

        // Seeded demo history is visible through the ledger
        let deposits = service.ledger.deposits(response.user.id).await.unwrap();
        assert_eq!(deposits.len(), 3);
    }

    #[tokio::test]
    async fn repeat_federated_login_does_not_reseed() {
        let service = service();

        let first = service.create_federated(create_request()).await.unwrap();
        let second = service.create_federated(create_request()).await.unwrap();

        assert!(!second.created);
        assert_eq!(second.user.id, first.user.id);
        // Addresses assigned at creation are stable across logins
        assert_eq!(second.user.btc_address, first.user.btc_address);

        let deposits = service.ledger.deposits(first.user.id).await.unwrap();
        assert_eq!(deposits.len(), 3, "history is seeded exactly once");
    }

    #[tokio::test]
    async fn profile_of_unknown_wallet_is_not_found() {
        let service = service();
        let err = service
            .profile(&Address::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(msg) if msg == "User not found"));
    }
}
