use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::currency::Currency;

/// Kind of ledger movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Send,
    Receive,
    Swap,
    Stake,
    Unstake,
    Deposit,
    Withdraw,
}

impl TransactionType {
    /// Whether this movement takes funds out of the spendable balance.
    #[must_use]
    pub fn is_outgoing(self) -> bool {
        matches!(
            self,
            TransactionType::Send | TransactionType::Stake | TransactionType::Deposit
        )
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Send => write!(f, "send"),
            TransactionType::Receive => write!(f, "receive"),
            TransactionType::Swap => write!(f, "swap"),
            TransactionType::Stake => write!(f, "stake"),
            TransactionType::Unstake => write!(f, "unstake"),
            TransactionType::Deposit => write!(f, "deposit"),
            TransactionType::Withdraw => write!(f, "withdraw"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Completed => write!(f, "completed"),
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One entry of the append-only transaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub timestamp: DateTime<Utc>,

    pub amount: f64,

    pub currency: Currency,

    /// Destination currency (swap only)
    #[serde(default)]
    pub to_currency: Option<Currency>,

    /// Destination amount (swap only)
    #[serde(default)]
    pub to_amount: Option<f64>,

    /// Recipient address (send only)
    #[serde(default)]
    pub address: Option<String>,

    pub status: TransactionStatus,
}

impl Transaction {
    /// A completed single-currency movement.
    pub fn completed(
        kind: TransactionType,
        currency: Currency,
        amount: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            timestamp,
            amount,
            currency,
            to_currency: None,
            to_amount: None,
            address: None,
            status: TransactionStatus::Completed,
        }
    }

    /// A completed send to `address`.
    pub fn send(
        currency: Currency,
        amount: f64,
        address: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            address: Some(address.into()),
            ..Self::completed(TransactionType::Send, currency, amount, timestamp)
        }
    }

    /// A completed swap from `currency` into `to_currency`.
    pub fn swap(
        currency: Currency,
        amount: f64,
        to_currency: Currency,
        to_amount: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            to_currency: Some(to_currency),
            to_amount: Some(to_amount),
            ..Self::completed(TransactionType::Swap, currency, amount, timestamp)
        }
    }
}
