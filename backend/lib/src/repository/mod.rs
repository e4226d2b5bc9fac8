//! Repository pattern implementation for database operations.
//!
//! ## Key Components
//! - [`SmartPool`] - Connection pool with automatic test transaction support
//! - [`RepositoryError`] - Error types for repository operations
//! - [`WalletOperations`] - Trait defining all database operations
//! - [`Repository`] - PostgreSQL implementation
//! - [`MockRepository`] - In-memory implementation for tests and demo mode
//!
//! The identity upserts are the one place where atomicity matters: concurrent
//! logins for a wallet or federated uid that does not exist yet must still
//! produce exactly one row.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

pub mod error;
pub mod mock;
pub mod models;
pub mod pool;
pub mod postgres;
pub mod schema;

// Re-export main types for convenience
pub use error::{RepositoryError, RepositoryResult};
pub use mock::MockRepository;
pub use models::{Deposit, User, Withdrawal};
pub use pool::SmartPool;
pub use postgres::Repository;

// ============ Input Types for Creating Records ============

/// Receive addresses assigned to a user at creation time
#[derive(Debug, Clone)]
pub struct ReceiveAddresses {
    pub btc_address: String,
    pub eth_address: String,
}

/// Input type for creating a federated (uid-keyed) user
#[derive(Debug, Clone)]
pub struct NewFederatedUser {
    pub uid: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub display_name: Option<String>,
}

/// Input type for creating a deposit.
///
/// `created_at` is only set when seeding demo history; `None` means now.
#[derive(Debug, Clone)]
pub struct NewDeposit {
    pub user_id: i64,
    pub currency: String,
    pub amount: BigDecimal,
    pub status: String,
    pub tx_hash: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Input type for creating a withdrawal
#[derive(Debug, Clone)]
pub struct NewWithdrawal {
    pub user_id: i64,
    pub currency: String,
    pub amount: BigDecimal,
    pub destination: String,
    pub status: String,
}

// ============ Repository Trait ============

/// Main trait defining all wallet storage operations.
///
/// Provides a unified interface for database access, allowing both the
/// production PostgreSQL and the in-memory mock implementation.
#[async_trait]
pub trait WalletOperations: Send + Sync {
    /// Check that the backing store is reachable.
    async fn test_connection(&self) -> RepositoryResult<()>;

    // ============ User Operations ============

    /// Atomic find-or-create keyed on the wallet address.
    ///
    /// Creates the user with the given receive addresses if absent, otherwise
    /// only bumps `last_login_at`. Returns the user and whether this call
    /// created it.
    async fn upsert_user_by_wallet(
        &self,
        wallet_address: &str,
        addresses: ReceiveAddresses,
    ) -> RepositoryResult<(User, bool)>;

    /// Atomic find-or-create keyed on the federated uid, with the same
    /// semantics as [`Self::upsert_user_by_wallet`].
    async fn upsert_user_by_uid(
        &self,
        new_user: NewFederatedUser,
        addresses: ReceiveAddresses,
    ) -> RepositoryResult<(User, bool)>;

    async fn get_user_by_wallet(&self, wallet_address: &str) -> RepositoryResult<Option<User>>;

    async fn get_user_by_uid(&self, uid: &str) -> RepositoryResult<Option<User>>;

    // ============ Deposit Operations ============

    /// Create a deposit for an existing user.
    async fn create_deposit(&self, new_deposit: NewDeposit) -> RepositoryResult<Deposit>;

    /// All deposits of a user, newest first.
    async fn get_deposits_by_user(&self, user_id: i64) -> RepositoryResult<Vec<Deposit>>;

    // ============ Withdrawal Operations ============

    /// Create a withdrawal for an existing user.
    async fn create_withdrawal(&self, new_withdrawal: NewWithdrawal)
        -> RepositoryResult<Withdrawal>;

    /// All withdrawals of a user, newest first.
    async fn get_withdrawals_by_user(&self, user_id: i64) -> RepositoryResult<Vec<Withdrawal>>;
}
