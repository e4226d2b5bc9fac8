//! Services module for the wallet demo backend

pub mod auth;
pub mod health;
pub mod ledger;
pub mod receive;
pub mod users;

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::config::Config;
use crate::constants::auth::MIN_SESSION_SECRET_LEN;
use crate::error::Error;
use crate::repository::WalletOperations;

#[derive(Clone)]
pub struct Services {
    pub config: Arc<Config>,
    pub auth: Arc<auth::AuthService>,
    pub users: Arc<users::UserService>,
    pub ledger: Arc<ledger::LedgerService>,
    pub health: Arc<health::HealthService>,
    session_key: Key,
}

/// Lets the SignedCookieJar extractor pull its signing key from the app state
impl FromRef<Services> for Key {
    fn from_ref(services: &Services) -> Key {
        services.session_key.clone()
    }
}

impl Services {
    pub fn new(config: Config, repository: Arc<dyn WalletOperations>) -> Result<Self, Error> {
        if config.auth.session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(Error::Config(format!(
                "session_secret must be at least {MIN_SESSION_SECRET_LEN} bytes"
            )));
        }
        let session_key = Key::derive_from(config.auth.session_secret.as_bytes());

        let receive: Arc<dyn receive::ReceiveAddressProvider> =
            Arc::new(receive::MockAddressProvider);
        let ledger = Arc::new(ledger::LedgerService::new(repository.clone()));

        Ok(Self {
            config: Arc::new(config),
            auth: Arc::new(auth::AuthService::new(repository.clone(), receive.clone())),
            users: Arc::new(users::UserService::new(
                repository.clone(),
                receive,
                ledger.clone(),
            )),
            ledger,
            health: Arc::new(health::HealthService::new(repository)),
            session_key,
        })
    }

    /// Services wired to the in-memory repository, for tests and demo mode
    #[cfg(feature = "mocks")]
    pub fn mocks() -> Self {
        Self::mocks_with_config(Config::default())
    }

    #[cfg(feature = "mocks")]
    pub fn mocks_with_config(config: Config) -> Self {
        Self::new(config, Arc::new(crate::repository::MockRepository::new()))
            .expect("default configuration is valid")
    }
}
