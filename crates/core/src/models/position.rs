use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::currency::Currency;

/// A fixed-term deposit.
///
/// Immutable once created. `interest` is the total payable at maturity and
/// is stored, not re-derived from elapsed time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositPosition {
    pub id: Uuid,

    pub currency: Currency,

    /// Principal (always positive)
    pub amount: f64,

    /// Annual percentage yield, as a percent (e.g. 10.5)
    pub apy: f64,

    pub start_date: DateTime<Utc>,

    /// Term length in whole days
    pub term_days: u32,

    /// `start_date + term_days` days
    pub maturity_date: DateTime<Utc>,

    /// Interest payable at maturity
    pub interest: f64,
}

impl DepositPosition {
    /// Build a deposit whose maturity date is derived from the term.
    pub fn new(
        currency: Currency,
        amount: f64,
        apy: f64,
        start_date: DateTime<Utc>,
        term_days: u32,
        interest: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            currency,
            amount,
            apy,
            start_date,
            term_days,
            maturity_date: start_date + Duration::days(i64::from(term_days)),
            interest,
        }
    }

    /// Principal plus interest at maturity.
    #[must_use]
    pub fn total_at_maturity(&self) -> f64 {
        self.amount + self.interest
    }
}

/// A staking position.
///
/// `rewards` is the simple-interest projection over the whole duration,
/// fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakePosition {
    pub id: Uuid,

    pub currency: Currency,

    /// Staked amount (always positive)
    pub amount: f64,

    /// Annual percentage yield, as a percent
    pub apy: f64,

    pub start_date: DateTime<Utc>,

    pub end_date: DateTime<Utc>,

    /// Projected rewards at `end_date`
    pub rewards: f64,

    pub duration_days: u32,
}

impl StakePosition {
    /// Build a stake whose end date is derived from the duration.
    pub fn new(
        currency: Currency,
        amount: f64,
        apy: f64,
        start_date: DateTime<Utc>,
        duration_days: u32,
        rewards: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            currency,
            amount,
            apy,
            start_date,
            end_date: start_date + Duration::days(i64::from(duration_days)),
            rewards,
            duration_days,
        }
    }
}
