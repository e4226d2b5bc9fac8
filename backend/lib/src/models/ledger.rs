use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::repository::models::{Deposit, Withdrawal};

/// Supported currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "BTC")]
    Btc,
    #[serde(rename = "ETH")]
    Eth,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Btc => "BTC",
            Currency::Eth => "ETH",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BTC" => Ok(Currency::Btc),
            "ETH" => Ok(Currency::Eth),
            other => Err(format!("unknown currency: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositStatus {
    Pending,
    Confirmed,
    Failed,
}

impl DepositStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepositStatus::Pending => "pending",
            DepositStatus::Confirmed => "confirmed",
            DepositStatus::Failed => "failed",
        }
    }
}

impl FromStr for DepositStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(DepositStatus::Pending),
            "confirmed" => Ok(DepositStatus::Confirmed),
            "failed" => Ok(DepositStatus::Failed),
            other => Err(format!("unknown deposit status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl WithdrawalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalStatus::Pending => "pending",
            WithdrawalStatus::Processing => "processing",
            WithdrawalStatus::Completed => "completed",
            WithdrawalStatus::Failed => "failed",
        }
    }
}

impl FromStr for WithdrawalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(WithdrawalStatus::Pending),
            "processing" => Ok(WithdrawalStatus::Processing),
            "completed" => Ok(WithdrawalStatus::Completed),
            "failed" => Ok(WithdrawalStatus::Failed),
            other => Err(format!("unknown withdrawal status: {other}")),
        }
    }
}

/// Deposit as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRecord {
    pub id: i64,
    pub user_id: i64,
    pub currency: Currency,
    pub amount: BigDecimal,
    pub status: DepositStatus,
    pub tx_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<Deposit> for DepositRecord {
    type Error = Error;

    fn try_from(row: Deposit) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            currency: row
                .currency
                .parse()
                .map_err(|e| Error::Database(format!("corrupt deposit row {}: {e}", row.id)))?,
            amount: row.amount,
            status: row
                .status
                .parse()
                .map_err(|e| Error::Database(format!("corrupt deposit row {}: {e}", row.id)))?,
            tx_hash: row.tx_hash,
            created_at: row.created_at,
        })
    }
}

/// Withdrawal as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRecord {
    pub id: i64,
    pub user_id: i64,
    pub currency: Currency,
    pub amount: BigDecimal,
    pub address: String,
    pub status: WithdrawalStatus,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<Withdrawal> for WithdrawalRecord {
    type Error = Error;

    fn try_from(row: Withdrawal) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            currency: row
                .currency
                .parse()
                .map_err(|e| Error::Database(format!("corrupt withdrawal row {}: {e}", row.id)))?,
            amount: row.amount,
            address: row.destination,
            status: row
                .status
                .parse()
                .map_err(|e| Error::Database(format!("corrupt withdrawal row {}: {e}", row.id)))?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepositRequest {
    pub currency: Currency,
    pub amount: BigDecimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWithdrawalRequest {
    pub currency: Currency,
    pub amount: BigDecimal,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedDepositsRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
}

/// Demo balances keyed by currency symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalancesResponse {
    #[serde(rename = "BTC")]
    pub btc: BigDecimal,
    #[serde(rename = "ETH")]
    pub eth: BigDecimal,
}
