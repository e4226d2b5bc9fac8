//! Health reporting over the backend's dependencies.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::repository::WalletOperations;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub components: ComponentHealth,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub database: String,
}

pub struct HealthService {
    repository: Arc<dyn WalletOperations>,
}

impl HealthService {
    pub fn new(repository: Arc<dyn WalletOperations>) -> Self {
        Self { repository }
    }

    /// Probe the backing store and report overall service health.
    pub async fn check(&self) -> HealthResponse {
        let database = match self.repository.test_connection().await {
            Ok(()) => "ok".to_string(),
            Err(err) => {
                warn!(error = %err, "database health check failed");
                "error".to_string()
            }
        };

        let status = if database == "ok" {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        };

        HealthResponse {
            status,
            service: "wallet-backend".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            components: ComponentHealth { database },
        }
    }
}
