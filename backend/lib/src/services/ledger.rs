//! Deposit and withdrawal bookkeeping.
//!
//! Deposits are created `pending` and there is no transition API; the demo
//! seeder writes `confirmed` rows directly. Withdrawals are created `pending`
//! and their lifecycle is managed externally. Balances are hard-coded demo
//! values, not derived from the ledger rows.

use std::sync::Arc;

use bigdecimal::{BigDecimal, Zero};
use chrono::{Duration, Utc};

use crate::constants::ledger::{
    BTC_MIN_WITHDRAWAL, DEMO_BTC_BALANCE, DEMO_BTC_CONFIRMED_AMOUNT, DEMO_BTC_CONFIRMED_TX,
    DEMO_BTC_PENDING_AMOUNT, DEMO_BTC_PENDING_TX, DEMO_ETH_BALANCE, DEMO_ETH_CONFIRMED_AMOUNT,
    DEMO_ETH_CONFIRMED_TX, ETH_MIN_WITHDRAWAL,
};
use crate::error::Error;
use crate::models::ledger::{
    BalancesResponse, CreateDepositRequest, CreateWithdrawalRequest, Currency, DepositRecord,
    DepositStatus, WithdrawalRecord, WithdrawalStatus,
};
use crate::repository::{NewDeposit, NewWithdrawal, WalletOperations};

pub struct LedgerService {
    repository: Arc<dyn WalletOperations>,
}

impl LedgerService {
    pub fn new(repository: Arc<dyn WalletOperations>) -> Self {
        Self { repository }
    }

    /// Record a pending deposit for the user.
    pub async fn create_deposit(
        &self,
        user_id: i64,
        request: CreateDepositRequest,
    ) -> Result<DepositRecord, Error> {
        if request.amount <= BigDecimal::zero() {
            return Err(Error::BadRequest("Invalid amount".to_string()));
        }

        let deposit = self
            .repository
            .create_deposit(NewDeposit {
                user_id,
                currency: request.currency.as_str().to_string(),
                amount: request.amount,
                status: DepositStatus::Pending.as_str().to_string(),
                tx_hash: None,
                created_at: None,
            })
            .await?;

        deposit.try_into()
    }

    /// All deposits of the user, newest first.
    pub async fn deposits(&self, user_id: i64) -> Result<Vec<DepositRecord>, Error> {
        self.repository
            .get_deposits_by_user(user_id)
            .await?
            .into_iter()
            .map(DepositRecord::try_from)
            .collect()
    }

    /// Seed the canned demo deposit history for a user: a confirmed BTC and
    /// ETH deposit from a few days back, plus a pending BTC deposit.
    pub async fn seed_demo_history(&self, user_id: i64) -> Result<Vec<DepositRecord>, Error> {
        let now = Utc::now();
        let demo_rows = [
            (
                Currency::Btc,
                DEMO_BTC_CONFIRMED_AMOUNT,
                DepositStatus::Confirmed,
                DEMO_BTC_CONFIRMED_TX,
                now - Duration::days(2),
            ),
            (
                Currency::Eth,
                DEMO_ETH_CONFIRMED_AMOUNT,
                DepositStatus::Confirmed,
                DEMO_ETH_CONFIRMED_TX,
                now - Duration::days(5),
            ),
            (
                Currency::Btc,
                DEMO_BTC_PENDING_AMOUNT,
                DepositStatus::Pending,
                DEMO_BTC_PENDING_TX,
                now - Duration::days(1),
            ),
        ];

        let mut seeded = Vec::with_capacity(demo_rows.len());
        for (currency, amount, status, tx_hash, created_at) in demo_rows {
            let deposit = self
                .repository
                .create_deposit(NewDeposit {
                    user_id,
                    currency: currency.as_str().to_string(),
                    amount: parse_amount(amount)?,
                    status: status.as_str().to_string(),
                    tx_hash: Some(tx_hash.to_string()),
                    created_at: Some(created_at),
                })
                .await?;
            seeded.push(deposit.try_into()?);
        }

        Ok(seeded)
    }

    /// Record a pending withdrawal after amount validation. The destination
    /// address format is validated at the API layer.
    pub async fn create_withdrawal(
        &self,
        user_id: i64,
        request: CreateWithdrawalRequest,
    ) -> Result<WithdrawalRecord, Error> {
        if request.amount <= BigDecimal::zero() {
            return Err(Error::BadRequest("Invalid amount".to_string()));
        }

        let minimum = match request.currency {
            Currency::Btc => parse_amount(BTC_MIN_WITHDRAWAL)?,
            Currency::Eth => parse_amount(ETH_MIN_WITHDRAWAL)?,
        };
        if request.amount < minimum {
            return Err(Error::BadRequest(format!(
                "Minimum withdrawal is {minimum} {}",
                request.currency
            )));
        }

        let withdrawal = self
            .repository
            .create_withdrawal(NewWithdrawal {
                user_id,
                currency: request.currency.as_str().to_string(),
                amount: request.amount,
                destination: request.address,
                status: WithdrawalStatus::Pending.as_str().to_string(),
            })
            .await?;

        withdrawal.try_into()
    }

    /// All withdrawals of the user, newest first.
    pub async fn withdrawals(&self, user_id: i64) -> Result<Vec<WithdrawalRecord>, Error> {
        self.repository
            .get_withdrawals_by_user(user_id)
            .await?
            .into_iter()
            .map(WithdrawalRecord::try_from)
            .collect()
    }

    /// Demo balances, identical for every user.
    pub fn balances(&self) -> Result<BalancesResponse, Error> {
        Ok(BalancesResponse {
            btc: parse_amount(DEMO_BTC_BALANCE)?,
            eth: parse_amount(DEMO_ETH_BALANCE)?,
        })
    }
}

fn parse_amount(raw: &str) -> Result<BigDecimal, Error> {
    raw.parse()
        .map_err(|_| Error::Config(format!("invalid decimal constant: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::test::ledger::{TEST_BTC_DESTINATION, TEST_ETH_DESTINATION};
    use crate::repository::{MockRepository, ReceiveAddresses};

    async fn service_with_user() -> (LedgerService, i64) {
        let repo = Arc::new(MockRepository::new());
        let (user, _) = repo
            .upsert_user_by_wallet(
                "0x00000000000000000000000000000000000000aa",
                ReceiveAddresses {
                    btc_address: TEST_BTC_DESTINATION.to_string(),
                    eth_address: TEST_ETH_DESTINATION.to_string(),
                },
            )
            .await
            .unwrap();
        (LedgerService::new(repo), user.id)
    }

    #[tokio::test]
    async fn deposit_rejects_non_positive_amounts() {
        let (service, user_id) = service_with_user().await;

        for amount in ["0", "-0.5"] {
            let err = service
                .create_deposit(
                    user_id,
                    CreateDepositRequest {
                        currency: Currency::Btc,
                        amount: amount.parse().unwrap(),
                    },
                )
                .await
                .unwrap_err();
            assert!(matches!(err, Error::BadRequest(msg) if msg == "Invalid amount"));
        }
    }

    #[tokio::test]
    async fn deposit_is_created_pending() {
        let (service, user_id) = service_with_user().await;

        let deposit = service
            .create_deposit(
                user_id,
                CreateDepositRequest {
                    currency: Currency::Eth,
                    amount: "0.5".parse().unwrap(),
                },
            )
            .await
            .unwrap();
        assert_eq!(deposit.status, DepositStatus::Pending);
        assert_eq!(deposit.currency, Currency::Eth);
        assert!(deposit.tx_hash.is_none());
    }

    #[tokio::test]
    async fn seeded_history_matches_demo_fixture() {
        let (service, user_id) = service_with_user().await;

        let seeded = service.seed_demo_history(user_id).await.unwrap();
        assert_eq!(seeded.len(), 3);

        let listed = service.deposits(user_id).await.unwrap();
        assert_eq!(listed.len(), 3);
        // Newest first: pending BTC (1 day), confirmed BTC (2 days), confirmed ETH (5 days)
        assert_eq!(listed[0].status, DepositStatus::Pending);
        assert_eq!(listed[0].currency, Currency::Btc);
        assert_eq!(listed[1].currency, Currency::Btc);
        assert_eq!(listed[1].status, DepositStatus::Confirmed);
        assert_eq!(listed[2].currency, Currency::Eth);
        assert_eq!(
            listed[2].amount,
            DEMO_ETH_CONFIRMED_AMOUNT.parse::<BigDecimal>().unwrap()
        );
        assert_eq!(listed[2].tx_hash.as_deref(), Some(DEMO_ETH_CONFIRMED_TX));
    }

    #[tokio::test]
    async fn withdrawal_enforces_per_currency_minimums() {
        let (service, user_id) = service_with_user().await;

        let err = service
            .create_withdrawal(
                user_id,
                CreateWithdrawalRequest {
                    currency: Currency::Btc,
                    amount: "0.0001".parse().unwrap(),
                    address: TEST_BTC_DESTINATION.to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));

        let err = service
            .create_withdrawal(
                user_id,
                CreateWithdrawalRequest {
                    currency: Currency::Eth,
                    amount: "0.005".parse().unwrap(),
                    address: TEST_ETH_DESTINATION.to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));

        let withdrawal = service
            .create_withdrawal(
                user_id,
                CreateWithdrawalRequest {
                    currency: Currency::Btc,
                    amount: "0.002".parse().unwrap(),
                    address: TEST_BTC_DESTINATION.to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(withdrawal.status, WithdrawalStatus::Pending);
        assert_eq!(withdrawal.address, TEST_BTC_DESTINATION);
    }

    #[tokio::test]
    async fn balances_return_demo_values() {
        let (service, _) = service_with_user().await;
        let balances = service.balances().unwrap();
        assert_eq!(balances.btc, DEMO_BTC_BALANCE.parse::<BigDecimal>().unwrap());
        assert_eq!(balances.eth, DEMO_ETH_BALANCE.parse::<BigDecimal>().unwrap());
    }
}
