use chrono::{DateTime, TimeZone, Utc};

use crate::errors::WalletError;
use crate::models::currency::Currency;
use crate::models::holding::Holding;
use crate::models::ledger::Ledger;
use crate::models::position::{DepositPosition, StakePosition};
use crate::models::transaction::{Transaction, TransactionType};
use crate::services::accrual::{days_between, implied_apy};

/// Demo figures are illustrative. Deposit APYs are backed out of the
/// principal/profit/date range, so they will not match the rate tables.
pub fn seed_ledger() -> Result<Ledger, WalletError> {
    Ok(Ledger {
        holdings: seed_holdings(),
        deposits: seed_deposits()?,
        stakes: seed_stakes()?,
        transactions: seed_transactions()?,
        settings: Default::default(),
    })
}

pub fn seed_holdings() -> Vec<Holding> {
    vec![
        Holding::new(Currency::USDT, 6135.0, 1.0),
        Holding::new(Currency::BTC, 0.0, 97_500.0),
        Holding::new(Currency::ETH, 0.0, 3_650.0),
        Holding::new(Currency::TRX, 0.0, 0.25),
        Holding::new(Currency::TON, 0.0, 5.80),
    ]
}

pub fn seed_stakes() -> Result<Vec<StakePosition>, WalletError> {
    // (amount, apy, start, duration days, rewards)
    let rows = [
        (1652.0, 30.84, utc(2025, 6, 18, 10, 30)?, 176, 149.0),
        (2565.0, 26.05, utc(2025, 8, 2, 15, 45)?, 207, 379.0),
        (3350.0, 35.32, utc(2025, 9, 26, 9, 20)?, 153, 496.0),
        (2785.0, 29.85, utc(2025, 7, 10, 16, 0)?, 181, 412.0),
    ];
    Ok(rows
        .into_iter()
        .map(|(amount, apy, start, days, rewards)| {
            StakePosition::new(Currency::USDT, amount, apy, start, days, rewards)
        })
        .collect())
}

pub fn seed_deposits() -> Result<Vec<DepositPosition>, WalletError> {
    // (principal, profit, start, end)
    let rows = [
        (3760.0, 574.0, utc(2025, 5, 2, 11, 0)?, utc(2025, 12, 12, 0, 0)?),
        (5035.0, 730.0, utc(2025, 7, 25, 19, 30)?, utc(2026, 1, 10, 0, 0)?),
        (1285.0, 179.0, utc(2025, 8, 20, 11, 0)?, utc(2026, 1, 20, 0, 0)?),
    ];
    rows.into_iter()
        .map(|(principal, profit, start, end)| {
            let apy = implied_apy(principal, profit, start, end)?;
            let term = u32::try_from(days_between(start, end)).map_err(|_| {
                WalletError::InvalidDateRange {
                    start: start.to_rfc3339(),
                    end: end.to_rfc3339(),
                }
            })?;
            Ok(DepositPosition::new(Currency::USDT, principal, apy, start, term, profit))
        })
        .collect()
}

/// Demo history, newest first: the opening of every seeded position, the
/// payouts of the first stake and the first deposit, and the top-up that
/// funds the current USDT balance.
pub fn seed_transactions() -> Result<Vec<Transaction>, WalletError> {
    use TransactionType::{Deposit, Stake, Unstake, Withdraw};

    let rows = [
        (Deposit, 6135.0, utc(2025, 12, 15, 19, 16)?),
        (Withdraw, 4334.0, utc(2025, 12, 12, 0, 0)?),
        (Unstake, 1801.0, utc(2025, 12, 11, 0, 0)?),
        (Stake, 3350.0, utc(2025, 9, 26, 9, 20)?),
        (Deposit, 1285.0, utc(2025, 8, 20, 11, 0)?),
        (Stake, 2565.0, utc(2025, 8, 2, 15, 45)?),
        (Deposit, 5035.0, utc(2025, 7, 25, 19, 30)?),
        (Stake, 2785.0, utc(2025, 7, 10, 16, 0)?),
        (Stake, 1652.0, utc(2025, 6, 18, 10, 30)?),
        (Deposit, 3760.0, utc(2025, 5, 2, 11, 0)?),
    ];
    let mut transactions: Vec<Transaction> = rows
        .into_iter()
        .map(|(kind, amount, at)| Transaction::completed(kind, Currency::USDT, amount, at))
        .collect();
    transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(transactions)
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> Result<DateTime<Utc>, WalletError> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .ok_or_else(|| WalletError::InvalidTimestamp(format!("{y}-{m:02}-{d:02} {h:02}:{min:02}")))
}
