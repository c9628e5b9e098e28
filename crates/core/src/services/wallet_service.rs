use chrono::{DateTime, Utc};
use log::{info, warn};
use uuid::Uuid;

use crate::errors::WalletError;
use crate::models::currency::Currency;
use crate::models::ledger::Ledger;
use crate::models::position::{DepositPosition, StakePosition};
use crate::models::transaction::{Transaction, TransactionType};

use super::accrual::accrue;
use super::position_service::PositionService;
use super::rates::{deposit_apy, staking_apy, swap_quote};

/// Parse an amount typed by the user.
///
/// Empty or whitespace-only input is `EmptyAmount`; anything that is not a
/// finite number is `InvalidAmount`; zero or negative is `NonPositiveAmount`.
pub fn parse_amount(input: &str) -> Result<f64, WalletError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(WalletError::EmptyAmount);
    }
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| WalletError::InvalidAmount(trimmed.to_string()))?;
    check_amount(amount)?;
    Ok(amount)
}

fn check_amount(amount: f64) -> Result<(), WalletError> {
    if !amount.is_finite() {
        return Err(WalletError::InvalidAmount(amount.to_string()));
    }
    if amount <= 0.0 {
        return Err(WalletError::NonPositiveAmount(amount));
    }
    Ok(())
}

/// Validates user operations and applies them to a ledger.
///
/// Every `apply_*` method validates first and only then mutates, so a
/// rejected operation leaves the ledger exactly as it was. The `check_*`
/// methods run the same validation without mutating.
pub struct WalletService {
    positions: PositionService,
}

impl WalletService {
    pub fn new() -> Self {
        Self {
            positions: PositionService::new(),
        }
    }

    // ── Validation ──────────────────────────────────────────────────

    /// `amount` is positive, finite and covered by the `currency` holding.
    pub fn check_spend(
        &self,
        ledger: &Ledger,
        currency: Currency,
        amount: f64,
    ) -> Result<(), WalletError> {
        check_amount(amount)?;
        let available = ledger.balance_of(currency);
        if amount > available {
            return Err(WalletError::InsufficientBalance {
                currency,
                requested: amount,
                available,
            });
        }
        Ok(())
    }

    /// A term or duration lies in `1..=max_days`.
    pub fn check_duration(&self, days: u32, max_days: u32) -> Result<(), WalletError> {
        if days == 0 || days > max_days {
            return Err(WalletError::InvalidDuration {
                days,
                max: max_days,
            });
        }
        Ok(())
    }

    pub fn check_deposit(
        &self,
        ledger: &Ledger,
        currency: Currency,
        amount: f64,
        term_days: u32,
    ) -> Result<(), WalletError> {
        self.check_spend(ledger, currency, amount)?;
        self.check_duration(term_days, ledger.settings.max_term_days)
    }

    pub fn check_stake(
        &self,
        ledger: &Ledger,
        currency: Currency,
        amount: f64,
        duration_days: u32,
    ) -> Result<(), WalletError> {
        self.check_spend(ledger, currency, amount)?;
        self.check_duration(duration_days, ledger.settings.max_term_days)?;
        if staking_apy(currency) <= 0.0 {
            return Err(WalletError::StakingUnavailable(currency));
        }
        Ok(())
    }

    pub fn check_send(
        &self,
        ledger: &Ledger,
        currency: Currency,
        amount: f64,
        address: &str,
    ) -> Result<(), WalletError> {
        if address.trim().is_empty() {
            return Err(WalletError::MissingAddress);
        }
        self.check_spend(ledger, currency, amount)
    }

    pub fn check_swap(
        &self,
        ledger: &Ledger,
        from: Currency,
        to: Currency,
        amount: f64,
    ) -> Result<(), WalletError> {
        self.check_spend(ledger, from, amount)?;
        if from == to {
            return Err(WalletError::SameCurrencySwap(from));
        }
        Ok(())
    }

    pub fn check_unstake(&self, ledger: &Ledger, stake_id: Uuid) -> Result<(), WalletError> {
        if ledger.stakes.iter().any(|s| s.id == stake_id) {
            Ok(())
        } else {
            Err(WalletError::PositionNotFound(stake_id.to_string()))
        }
    }

    // ── Quotes ──────────────────────────────────────────────────────

    /// APY and interest at maturity for a prospective deposit.
    pub fn quote_deposit(&self, currency: Currency, amount: f64, term_days: u32) -> (f64, f64) {
        let apy = deposit_apy(currency, term_days);
        (apy, accrue(amount, apy, f64::from(term_days)))
    }

    /// APY and projected rewards for a prospective stake.
    pub fn quote_stake(&self, currency: Currency, amount: f64, duration_days: u32) -> (f64, f64) {
        let apy = staking_apy(currency);
        (apy, accrue(amount, apy, f64::from(duration_days)))
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Lock `amount` of `currency` into a new term deposit.
    pub fn apply_deposit(
        &self,
        ledger: &mut Ledger,
        currency: Currency,
        amount: f64,
        term_days: u32,
        now: DateTime<Utc>,
    ) -> Result<DepositPosition, WalletError> {
        self.check_deposit(ledger, currency, amount, term_days)
            .inspect_err(|e| warn!("deposit of {amount} {currency} rejected: {e}"))?;

        let (apy, interest) = self.quote_deposit(currency, amount, term_days);
        let deposit = DepositPosition::new(currency, amount, apy, now, term_days, interest);

        ledger.holding_mut(currency).amount -= amount;
        ledger.deposits.push(deposit.clone());
        ledger.record(Transaction::completed(
            TransactionType::Deposit,
            currency,
            amount,
            now,
        ));

        info!(
            "deposit {} opened: {amount} {currency} for {term_days}d at {apy}% (interest {interest})",
            deposit.id
        );
        Ok(deposit)
    }

    /// Lock `amount` of `currency` into a new stake.
    pub fn apply_stake(
        &self,
        ledger: &mut Ledger,
        currency: Currency,
        amount: f64,
        duration_days: u32,
        now: DateTime<Utc>,
    ) -> Result<StakePosition, WalletError> {
        self.check_stake(ledger, currency, amount, duration_days)
            .inspect_err(|e| warn!("stake of {amount} {currency} rejected: {e}"))?;

        let (apy, rewards) = self.quote_stake(currency, amount, duration_days);
        let stake = StakePosition::new(currency, amount, apy, now, duration_days, rewards);

        ledger.holding_mut(currency).amount -= amount;
        ledger.stakes.push(stake.clone());
        ledger.record(Transaction::completed(
            TransactionType::Stake,
            currency,
            amount,
            now,
        ));

        info!(
            "stake {} opened: {amount} {currency} for {duration_days}d at {apy}% (rewards {rewards})",
            stake.id
        );
        Ok(stake)
    }

    /// Remove a stake and credit principal plus accrued rewards.
    pub fn apply_unstake(
        &self,
        ledger: &mut Ledger,
        stake_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Transaction, WalletError> {
        let idx = ledger
            .stakes
            .iter()
            .position(|s| s.id == stake_id)
            .ok_or_else(|| WalletError::PositionNotFound(stake_id.to_string()))?;

        let status = self.positions.stake_status(&ledger.stakes[idx], now);
        let stake = ledger.stakes.remove(idx);
        let payout = stake.amount + status.accrued_rewards;

        ledger.holding_mut(stake.currency).amount += payout;
        let tx = Transaction::completed(TransactionType::Unstake, stake.currency, payout, now);
        ledger.record(tx.clone());

        info!(
            "stake {} closed ({}): paid out {payout} {}",
            stake.id, status.lifecycle.state, stake.currency
        );
        Ok(tx)
    }

    /// Send `amount` of `currency` to an external address.
    pub fn apply_send(
        &self,
        ledger: &mut Ledger,
        currency: Currency,
        amount: f64,
        address: &str,
        now: DateTime<Utc>,
    ) -> Result<Transaction, WalletError> {
        self.check_send(ledger, currency, amount, address)
            .inspect_err(|e| warn!("send of {amount} {currency} rejected: {e}"))?;

        ledger.holding_mut(currency).amount -= amount;
        let tx = Transaction::send(currency, amount, address.trim(), now);
        ledger.record(tx.clone());

        info!("sent {amount} {currency} to {}", address.trim());
        Ok(tx)
    }

    /// Exchange `amount` of `from` into `to` at reference prices.
    pub fn apply_swap(
        &self,
        ledger: &mut Ledger,
        from: Currency,
        to: Currency,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<Transaction, WalletError> {
        self.check_swap(ledger, from, to, amount)
            .inspect_err(|e| warn!("swap of {amount} {from} -> {to} rejected: {e}"))?;

        let received = swap_quote(from, to, amount);
        ledger.holding_mut(from).amount -= amount;
        ledger.holding_mut(to).amount += received;
        let tx = Transaction::swap(from, amount, to, received, now);
        ledger.record(tx.clone());

        info!("swapped {amount} {from} for {received} {to}");
        Ok(tx)
    }
}

impl Default for WalletService {
    fn default() -> Self {
        Self::new()
    }
}
