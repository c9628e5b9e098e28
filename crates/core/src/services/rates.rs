use crate::models::currency::Currency;

/// Deposit rate tiers, in days.
pub const DEPOSIT_TIERS: [u32; 3] = [30, 60, 90];

/// Staking APY in percent. Zero means staking is not offered.
#[must_use]
pub fn staking_apy(currency: Currency) -> f64 {
    match currency {
        Currency::BTC => 0.0,
        Currency::ETH => 4.2,
        Currency::USDT => 8.5,
        Currency::TRX => 6.0,
        Currency::TON => 5.5,
        Currency::BNB => 5.8,
        Currency::SOL => 7.1,
        Currency::XRP => 3.5,
    }
}

/// Deposit APY in percent for a tier (30, 60 or 90 days).
fn tier_apy(currency: Currency, tier: u32) -> f64 {
    let (t30, t60, t90) = match currency {
        Currency::BTC => (2.5, 3.5, 5.0),
        Currency::ETH => (5.0, 6.5, 8.0),
        Currency::USDT => (9.0, 10.5, 12.0),
        Currency::TRX => (7.0, 8.5, 10.0),
        Currency::TON => (6.5, 8.0, 9.5),
        Currency::BNB => (6.5, 8.0, 10.0),
        Currency::SOL => (8.0, 9.5, 11.5),
        Currency::XRP => (4.0, 5.5, 7.0),
    };
    match tier {
        30 => t30,
        60 => t60,
        _ => t90,
    }
}

/// The rate tier a term falls into: ≤30 → 30, ≤60 → 60, otherwise 90.
#[must_use]
pub fn deposit_tier(term_days: u32) -> u32 {
    DEPOSIT_TIERS
        .into_iter()
        .find(|tier| term_days <= *tier)
        .unwrap_or(90)
}

/// Deposit APY in percent for `currency` over `term_days`.
#[must_use]
pub fn deposit_apy(currency: Currency, term_days: u32) -> f64 {
    tier_apy(currency, deposit_tier(term_days))
}

/// Amount of `to` received for `amount` of `from`, at reference prices.
#[must_use]
pub fn swap_quote(from: Currency, to: Currency, amount: f64) -> f64 {
    amount * (from.price_usd() / to.price_usd())
}
