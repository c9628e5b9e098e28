use chrono::{DateTime, Utc};
use log::debug;

use crate::models::ledger::Ledger;
use crate::models::position::{DepositPosition, StakePosition};
use crate::models::status::{DepositStatus, StakeStatus};

use super::accrual::{accrue, fractional_days_between};
use super::lifecycle::classify;

/// Derives the view state of deposits and stakes from stored timestamps.
///
/// Pure business logic: nothing here mutates the ledger. Accrual is always
/// recomputed from `now`, never ticked.
pub struct PositionService;

impl PositionService {
    pub fn new() -> Self {
        Self
    }

    /// Lifecycle and accrued interest of a deposit at `now`.
    ///
    /// Elapsed time is capped at the term, so a matured deposit reports
    /// exactly its full-term accrual.
    pub fn deposit_status(&self, deposit: &DepositPosition, now: DateTime<Utc>) -> DepositStatus {
        let lifecycle = classify(deposit.start_date, deposit.maturity_date, now);
        let elapsed = Self::capped_elapsed_days(
            deposit.start_date,
            now,
            f64::from(deposit.term_days),
            lifecycle.is_matured(),
        );
        let accrued_interest = accrue(deposit.amount, deposit.apy, elapsed);
        debug!(
            "deposit {} at {now}: {} {:.2}% elapsed {elapsed:.3}d accrued {accrued_interest}",
            deposit.id, lifecycle.state, lifecycle.progress
        );
        DepositStatus {
            deposit: deposit.clone(),
            lifecycle,
            accrued_interest,
            total_at_maturity: deposit.total_at_maturity(),
        }
    }

    /// Lifecycle and accrued rewards of a stake at `now` (capped at the duration).
    pub fn stake_status(&self, stake: &StakePosition, now: DateTime<Utc>) -> StakeStatus {
        let lifecycle = classify(stake.start_date, stake.end_date, now);
        let elapsed = Self::capped_elapsed_days(
            stake.start_date,
            now,
            f64::from(stake.duration_days),
            lifecycle.is_matured(),
        );
        StakeStatus {
            stake: stake.clone(),
            lifecycle,
            accrued_rewards: accrue(stake.amount, stake.apy, elapsed),
        }
    }

    /// Status of every deposit, in ledger order.
    pub fn deposit_statuses(&self, ledger: &Ledger, now: DateTime<Utc>) -> Vec<DepositStatus> {
        ledger
            .deposits
            .iter()
            .map(|d| self.deposit_status(d, now))
            .collect()
    }

    /// Status of every stake, in ledger order.
    pub fn stake_statuses(&self, ledger: &Ledger, now: DateTime<Utc>) -> Vec<StakeStatus> {
        ledger
            .stakes
            .iter()
            .map(|s| self.stake_status(s, now))
            .collect()
    }

    pub fn active_deposits(&self, ledger: &Ledger, now: DateTime<Utc>) -> Vec<DepositStatus> {
        self.deposit_statuses(ledger, now)
            .into_iter()
            .filter(|s| !s.lifecycle.is_matured())
            .collect()
    }

    pub fn matured_deposits(&self, ledger: &Ledger, now: DateTime<Utc>) -> Vec<DepositStatus> {
        self.deposit_statuses(ledger, now)
            .into_iter()
            .filter(|s| s.lifecycle.is_matured())
            .collect()
    }

    pub fn active_stakes(&self, ledger: &Ledger, now: DateTime<Utc>) -> Vec<StakeStatus> {
        self.stake_statuses(ledger, now)
            .into_iter()
            .filter(|s| !s.lifecycle.is_matured())
            .collect()
    }

    pub fn completed_stakes(&self, ledger: &Ledger, now: DateTime<Utc>) -> Vec<StakeStatus> {
        self.stake_statuses(ledger, now)
            .into_iter()
            .filter(|s| s.lifecycle.is_matured())
            .collect()
    }

    /// Fractional days since `start`, never negative and never past `period`.
    fn capped_elapsed_days(
        start: DateTime<Utc>,
        now: DateTime<Utc>,
        period: f64,
        matured: bool,
    ) -> f64 {
        if matured {
            return period;
        }
        fractional_days_between(start, now).clamp(0.0, period)
    }
}

impl Default for PositionService {
    fn default() -> Self {
        Self::new()
    }
}
