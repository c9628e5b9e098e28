use chrono::{DateTime, Utc};

use crate::models::ledger::Ledger;
use crate::models::summary::WalletSummary;

use super::position_service::PositionService;

/// Computes dashboard totals over the whole ledger.
pub struct SummaryService {
    positions: PositionService,
}

impl SummaryService {
    pub fn new() -> Self {
        Self {
            positions: PositionService::new(),
        }
    }

    /// Totals at `now`. Holdings and positions are both valued at the
    /// reference price of their currency.
    pub fn summary(&self, ledger: &Ledger, now: DateTime<Utc>) -> WalletSummary {
        let available_usd: f64 = ledger.holdings.iter().map(|h| h.value_usd()).sum();

        let mut deposited_usd = 0.0;
        let mut projected_interest_usd = 0.0;
        let mut accrued_interest_usd = 0.0;
        let mut active_deposits = 0;
        let mut matured_deposits = 0;

        for status in self.positions.deposit_statuses(ledger, now) {
            let price = status.deposit.currency.price_usd();
            deposited_usd += status.deposit.amount * price;
            projected_interest_usd += status.deposit.interest * price;
            accrued_interest_usd += status.accrued_interest * price;
            if status.lifecycle.is_matured() {
                matured_deposits += 1;
            } else {
                active_deposits += 1;
            }
        }

        let mut staked_usd = 0.0;
        let mut projected_rewards_usd = 0.0;
        let mut accrued_rewards_usd = 0.0;
        let mut active_stakes = 0;
        let mut completed_stakes = 0;

        for status in self.positions.stake_statuses(ledger, now) {
            let price = status.stake.currency.price_usd();
            staked_usd += status.stake.amount * price;
            projected_rewards_usd += status.stake.rewards * price;
            accrued_rewards_usd += status.accrued_rewards * price;
            if status.lifecycle.is_matured() {
                completed_stakes += 1;
            } else {
                active_stakes += 1;
            }
        }

        WalletSummary {
            as_of: now,
            available_usd,
            deposited_usd,
            staked_usd,
            total_balance_usd: available_usd + deposited_usd + staked_usd,
            projected_interest_usd,
            projected_rewards_usd,
            accrued_interest_usd,
            accrued_rewards_usd,
            active_deposits,
            matured_deposits,
            active_stakes,
            completed_stakes,
        }
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new()
    }
}
