use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dashboard totals at a point in time. All monetary values are USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSummary {
    /// Instant the summary was computed for
    pub as_of: DateTime<Utc>,

    /// Spendable balance: Σ holding amount × its unit price
    pub available_usd: f64,

    /// Principal locked in deposits (any state)
    pub deposited_usd: f64,

    /// Principal locked in stakes (any state)
    pub staked_usd: f64,

    /// available + deposited + staked
    pub total_balance_usd: f64,

    /// Σ stored deposit interest
    pub projected_interest_usd: f64,

    /// Σ stored stake rewards
    pub projected_rewards_usd: f64,

    /// Deposit interest accrued up to `as_of`
    pub accrued_interest_usd: f64,

    /// Staking rewards accrued up to `as_of`
    pub accrued_rewards_usd: f64,

    pub active_deposits: usize,

    pub matured_deposits: usize,

    pub active_stakes: usize,

    pub completed_stakes: usize,
}
