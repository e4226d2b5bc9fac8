//! PostgreSQL repository implementation.
//!
//! ## Key Components
//! - [`Repository`] - PostgreSQL implementation of WalletOperations
//!
//! The identity upserts rely on the unique constraints on
//! `users.wallet_address` and `users.uid` plus `ON CONFLICT DO UPDATE`, so a
//! concurrent burst of first logins still creates a single row. Whether a call
//! created the row is detected by comparing `created_at` and `last_login_at`:
//! only a freshly inserted row has them equal.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::{
    error::RepositoryResult,
    models::{Deposit, User, Withdrawal},
    pool::SmartPool,
    schema::{deposits, users, withdrawals},
    NewDeposit, NewFederatedUser, NewWithdrawal, ReceiveAddresses, WalletOperations,
};

/// PostgreSQL repository implementation.
///
/// Provides all database operations using a connection pool
/// with automatic test transaction management.
pub struct Repository {
    pool: SmartPool,
}

impl Repository {
    /// Create a new Repository with the given database URL.
    pub async fn new(database_url: &str) -> RepositoryResult<Self> {
        Ok(Self {
            pool: SmartPool::new(database_url).await?,
        })
    }
}

#[async_trait]
impl WalletOperations for Repository {
    async fn test_connection(&self) -> RepositoryResult<()> {
        let mut conn = self.pool.get().await?;
        diesel::sql_query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    // ============ User Operations ============

    async fn upsert_user_by_wallet(
        &self,
        wallet_address: &str,
        addresses: ReceiveAddresses,
    ) -> RepositoryResult<(User, bool)> {
        let mut conn = self.pool.get().await?;
        let now = Utc::now();

        let user: User = diesel::insert_into(users::table)
            .values((
                users::wallet_address.eq(wallet_address),
                users::btc_address.eq(&addresses.btc_address),
                users::eth_address.eq(&addresses.eth_address),
                users::created_at.eq(now),
                users::last_login_at.eq(now),
            ))
            .on_conflict(users::wallet_address)
            .do_update()
            .set(users::last_login_at.eq(now))
            .returning(User::as_returning())
            .get_result(&mut *conn)
            .await?;

        let created = user.created_at == user.last_login_at;
        Ok((user, created))
    }

    async fn upsert_user_by_uid(
        &self,
        new_user: NewFederatedUser,
        addresses: ReceiveAddresses,
    ) -> RepositoryResult<(User, bool)> {
        let mut conn = self.pool.get().await?;
        let now = Utc::now();

        let user: User = diesel::insert_into(users::table)
            .values((
                users::uid.eq(&new_user.uid),
                users::email.eq(&new_user.email),
                users::phone_number.eq(&new_user.phone_number),
                users::display_name.eq(&new_user.display_name),
                users::btc_address.eq(&addresses.btc_address),
                users::eth_address.eq(&addresses.eth_address),
                users::created_at.eq(now),
                users::last_login_at.eq(now),
            ))
            .on_conflict(users::uid)
            .do_update()
            .set(users::last_login_at.eq(now))
            .returning(User::as_returning())
            .get_result(&mut *conn)
            .await?;

        let created = user.created_at == user.last_login_at;
        Ok((user, created))
    }

    async fn get_user_by_wallet(&self, wallet_address: &str) -> RepositoryResult<Option<User>> {
        let mut conn = self.pool.get().await?;

        let result: Option<User> = users::table
            .filter(users::wallet_address.eq(wallet_address))
            .select(User::as_select())
            .first(&mut *conn)
            .await
            .optional()?;

        Ok(result)
    }

    async fn get_user_by_uid(&self, uid: &str) -> RepositoryResult<Option<User>> {
        let mut conn = self.pool.get().await?;

        let result: Option<User> = users::table
            .filter(users::uid.eq(uid))
            .select(User::as_select())
            .first(&mut *conn)
            .await
            .optional()?;

        Ok(result)
    }

    // ============ Deposit Operations ============

    async fn create_deposit(&self, new_deposit: NewDeposit) -> RepositoryResult<Deposit> {
        let mut conn = self.pool.get().await?;
        let created_at = new_deposit.created_at.unwrap_or_else(Utc::now);

        let result: Deposit = diesel::insert_into(deposits::table)
            .values((
                deposits::user_id.eq(new_deposit.user_id),
                deposits::currency.eq(&new_deposit.currency),
                deposits::amount.eq(&new_deposit.amount),
                deposits::status.eq(&new_deposit.status),
                deposits::tx_hash.eq(&new_deposit.tx_hash),
                deposits::created_at.eq(created_at),
            ))
            .returning(Deposit::as_returning())
            .get_result(&mut *conn)
            .await?;

        Ok(result)
    }

    async fn get_deposits_by_user(&self, user_id: i64) -> RepositoryResult<Vec<Deposit>> {
        let mut conn = self.pool.get().await?;

        let results: Vec<Deposit> = deposits::table
            .filter(deposits::user_id.eq(user_id))
            .order((deposits::created_at.desc(), deposits::id.desc()))
            .select(Deposit::as_select())
            .load(&mut *conn)
            .await?;

        Ok(results)
    }

    // ============ Withdrawal Operations ============

    async fn create_withdrawal(
        &self,
        new_withdrawal: NewWithdrawal,
    ) -> RepositoryResult<Withdrawal> {
        let mut conn = self.pool.get().await?;
        let now = Utc::now();

        let result: Withdrawal = diesel::insert_into(withdrawals::table)
            .values((
                withdrawals::user_id.eq(new_withdrawal.user_id),
                withdrawals::currency.eq(&new_withdrawal.currency),
                withdrawals::amount.eq(&new_withdrawal.amount),
                withdrawals::destination.eq(&new_withdrawal.destination),
                withdrawals::status.eq(&new_withdrawal.status),
                withdrawals::created_at.eq(now),
            ))
            .returning(Withdrawal::as_returning())
            .get_result(&mut *conn)
            .await?;

        Ok(result)
    }

    async fn get_withdrawals_by_user(&self, user_id: i64) -> RepositoryResult<Vec<Withdrawal>> {
        let mut conn = self.pool.get().await?;

        let results: Vec<Withdrawal> = withdrawals::table
            .filter(withdrawals::user_id.eq(user_id))
            .order((withdrawals::created_at.desc(), withdrawals::id.desc()))
            .select(Withdrawal::as_select())
            .load(&mut *conn)
            .await?;

        Ok(results)
    }
}
