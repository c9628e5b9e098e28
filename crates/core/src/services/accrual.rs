use chrono::{DateTime, Utc};

use crate::errors::WalletError;

/// Milliseconds in one day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Days in the simple-interest year.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Simple (non-compounding) yield of `amount` at `apy_percent` over `period_days`.
///
/// `amount * (apy / 100) * (days / 365)`. Linear in both amount and days,
/// zero when any input is zero, and unrounded. Inputs are not validated;
/// callers pass non-negative values.
#[must_use]
pub fn accrue(amount: f64, apy_percent: f64, period_days: f64) -> f64 {
    amount * (apy_percent / 100.0) * (period_days / DAYS_PER_YEAR)
}

/// Whole days between two instants, floored.
#[must_use]
pub fn days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    ((end - start).num_milliseconds() as f64 / MS_PER_DAY).floor() as i64
}

/// Fractional days between two instants (negative if `end` is before `start`).
#[must_use]
pub fn fractional_days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / MS_PER_DAY
}

/// The APY that makes `principal` earn `profit` between `start` and `end`.
///
/// Inverse of [`accrue`] over the floored day count; used to seed demo
/// records from a known principal/profit/date range. The range must span
/// at least one whole day and the principal must be positive.
pub fn implied_apy(
    principal: f64,
    profit: f64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<f64, WalletError> {
    let days = days_between(start, end);
    if days < 1 {
        return Err(WalletError::InvalidDateRange {
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
        });
    }
    if principal <= 0.0 {
        return Err(WalletError::ZeroPrincipal);
    }
    Ok((profit / principal) * (DAYS_PER_YEAR / days as f64) * 100.0)
}

