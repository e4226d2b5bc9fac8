//! Mock repository implementation for unit testing and demo mode.
//!
//! Provides an in-memory implementation of the repository pattern that mimics
//! database operations without requiring a real database connection. Upserts
//! take the table's write lock for their whole find-or-create sequence, which
//! gives them the same once-only creation guarantee as the SQL
//! `ON CONFLICT DO UPDATE` path.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{
    models::{Deposit, User, Withdrawal},
    NewDeposit, NewFederatedUser, NewWithdrawal, ReceiveAddresses, WalletOperations,
};
use crate::repository::error::{RepositoryError, RepositoryResult};

/// Mock repository implementation using in-memory storage
pub struct MockRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    deposits: Arc<RwLock<HashMap<i64, Deposit>>>,
    withdrawals: Arc<RwLock<HashMap<i64, Withdrawal>>>,
    next_id: Arc<AtomicI64>,
}

impl MockRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            deposits: Arc::new(RwLock::new(HashMap::new())),
            withdrawals: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Generate next unique ID
    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletOperations for MockRepository {
    async fn test_connection(&self) -> RepositoryResult<()> {
        Ok(())
    }

    // ============ User Operations ============

    async fn upsert_user_by_wallet(
        &self,
        wallet_address: &str,
        addresses: ReceiveAddresses,
    ) -> RepositoryResult<(User, bool)> {
        // Hold the write lock across the lookup and the insert so concurrent
        // upserts for the same wallet cannot both create a row
        let mut users = self.users.write().await;
        let now = Utc::now();

        if let Some(user) = users
            .values_mut()
            .find(|u| u.wallet_address.as_deref() == Some(wallet_address))
        {
            user.last_login_at = now;
            return Ok((user.clone(), false));
        }

        let id = self.next_id();
        let user = User {
            id,
            wallet_address: Some(wallet_address.to_string()),
            uid: None,
            email: None,
            phone_number: None,
            display_name: None,
            btc_address: addresses.btc_address,
            eth_address: addresses.eth_address,
            created_at: now,
            last_login_at: now,
        };
        users.insert(id, user.clone());
        Ok((user, true))
    }

    async fn upsert_user_by_uid(
        &self,
        new_user: NewFederatedUser,
        addresses: ReceiveAddresses,
    ) -> RepositoryResult<(User, bool)> {
        let mut users = self.users.write().await;
        let now = Utc::now();

        if let Some(user) = users
            .values_mut()
            .find(|u| u.uid.as_deref() == Some(new_user.uid.as_str()))
        {
            user.last_login_at = now;
            return Ok((user.clone(), false));
        }

        let id = self.next_id();
        let user = User {
            id,
            wallet_address: None,
            uid: Some(new_user.uid),
            email: new_user.email,
            phone_number: new_user.phone_number,
            display_name: new_user.display_name,
            btc_address: addresses.btc_address,
            eth_address: addresses.eth_address,
            created_at: now,
            last_login_at: now,
        };
        users.insert(id, user.clone());
        Ok((user, true))
    }

    async fn get_user_by_wallet(&self, wallet_address: &str) -> RepositoryResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.wallet_address.as_deref() == Some(wallet_address))
            .cloned())
    }

    async fn get_user_by_uid(&self, uid: &str) -> RepositoryResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.uid.as_deref() == Some(uid)).cloned())
    }

    // ============ Deposit Operations ============

    async fn create_deposit(&self, new_deposit: NewDeposit) -> RepositoryResult<Deposit> {
        if !self.users.read().await.contains_key(&new_deposit.user_id) {
            return Err(RepositoryError::not_found("User"));
        }

        let mut deposits = self.deposits.write().await;
        let id = self.next_id();
        let deposit = Deposit {
            id,
            user_id: new_deposit.user_id,
            currency: new_deposit.currency,
            amount: new_deposit.amount,
            status: new_deposit.status,
            tx_hash: new_deposit.tx_hash,
            created_at: new_deposit.created_at.unwrap_or_else(Utc::now),
        };
        deposits.insert(id, deposit.clone());
        Ok(deposit)
    }

    async fn get_deposits_by_user(&self, user_id: i64) -> RepositoryResult<Vec<Deposit>> {
        let deposits = self.deposits.read().await;
        let mut results: Vec<Deposit> = deposits
            .values()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect();
        // Newest first, matching the SQL ordering
        results.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(results)
    }

    // ============ Withdrawal Operations ============

    async fn create_withdrawal(
        &self,
        new_withdrawal: NewWithdrawal,
    ) -> RepositoryResult<Withdrawal> {
        if !self.users.read().await.contains_key(&new_withdrawal.user_id) {
            return Err(RepositoryError::not_found("User"));
        }

        let mut withdrawals = self.withdrawals.write().await;
        let id = self.next_id();
        let withdrawal = Withdrawal {
            id,
            user_id: new_withdrawal.user_id,
            currency: new_withdrawal.currency,
            amount: new_withdrawal.amount,
            destination: new_withdrawal.destination,
            status: new_withdrawal.status,
            created_at: Utc::now(),
        };
        withdrawals.insert(id, withdrawal.clone());
        Ok(withdrawal)
    }

    async fn get_withdrawals_by_user(&self, user_id: i64) -> RepositoryResult<Vec<Withdrawal>> {
        let withdrawals = self.withdrawals.read().await;
        let mut results: Vec<Withdrawal> = withdrawals
            .values()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect();
        results.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(results)
    }
}
