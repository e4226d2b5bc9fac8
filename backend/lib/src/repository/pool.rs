//! SmartPool implementation for automatic test transaction management.
//!
//! ## Features
//! - Automatic test transactions in test mode (single connection)
//! - Normal pooling in production mode

#[cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(test)]
use diesel_async::AsyncConnection;
#[cfg(not(test))]
use {diesel_async::RunQueryDsl, std::time::Duration};

use diesel_async::{
    pooled_connection::{bb8::Pool, AsyncDieselConnectionManager},
    AsyncPgConnection,
};

#[cfg(not(test))]
use crate::constants::database::{DEFAULT_CONNECTION_TIMEOUT_SECS, DEFAULT_MAX_CONNECTIONS};

use super::error::RepositoryError;

pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConnection<'a> =
    diesel_async::pooled_connection::bb8::PooledConnection<'a, AsyncPgConnection>;

/// Smart connection pool that automatically manages test transactions.
///
/// In test mode:
/// - Uses single connection to enable test transactions
/// - Automatically begins test transaction on first connection
/// - Transaction automatically rolls back when test ends
///
/// In production mode:
/// - Uses normal connection pooling
/// - No test transaction overhead
pub struct SmartPool {
    /// The underlying bb8 pool
    inner: Arc<DbPool>,

    /// Track whether test transaction has been initialized (test mode only)
    #[cfg(test)]
    test_tx_initialized: AtomicBool,
}

impl SmartPool {
    /// Create a new SmartPool with the given database URL.
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);

        // Configure pool based on compile mode
        #[cfg(test)]
        let pool = {
            // Single connection for test transactions
            Pool::builder()
                .max_size(1)
                .build(manager)
                .await
                .map_err(|e| RepositoryError::Pool(format!("Failed to create test pool: {}", e)))?
        };

        #[cfg(not(test))]
        let pool = {
            let pool = Pool::builder()
                .max_size(DEFAULT_MAX_CONNECTIONS)
                .connection_timeout(Duration::from_secs(DEFAULT_CONNECTION_TIMEOUT_SECS))
                .build(manager)
                .await
                .map_err(|e| {
                    RepositoryError::Pool(format!("Failed to create production pool: {}", e))
                })?;

            // Perform immediate health-check to surface connection errors early
            {
                let mut conn = pool.get().await.map_err(|e| {
                    RepositoryError::Pool(format!("Failed to get connection: {}", e))
                })?;
                diesel::sql_query("SELECT 1")
                    .execute(&mut conn)
                    .await
                    .map_err(|e| RepositoryError::Pool(format!("Healthcheck failed: {}", e)))?;
            }

            pool
        };

        Ok(Self {
            inner: Arc::new(pool),
            #[cfg(test)]
            test_tx_initialized: AtomicBool::new(false),
        })
    }

    /// Get a connection from the pool.
    ///
    /// In test mode, this will automatically begin a test transaction
    /// on the first call, which will be rolled back when the test ends.
    pub async fn get(&self) -> Result<DbConnection<'_>, RepositoryError> {
        #[allow(unused_mut)]
        let mut conn = self
            .inner
            .get()
            .await
            .map_err(|e| RepositoryError::Pool(format!("Failed to get connection: {}", e)))?;

        #[cfg(test)]
        {
            if self
                .test_tx_initialized
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                // Begin test transaction that will rollback automatically
                conn.begin_test_transaction()
                    .await
                    .map_err(RepositoryError::Database)?;
            }
        }

        Ok(conn)
    }
}
