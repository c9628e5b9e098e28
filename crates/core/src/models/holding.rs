use serde::{Deserialize, Serialize};

use super::currency::Currency;

/// A spendable balance in one currency.
///
/// Holdings are debited and credited by user operations but never
/// removed; an exhausted holding stays in the ledger with amount 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub currency: Currency,

    /// Amount held (never negative)
    pub amount: f64,

    /// Unit price in USD carried with the holding. Stored for display;
    /// valuation uses the pricing table.
    pub price_usd: f64,
}

impl Holding {
    pub fn new(currency: Currency, amount: f64, price_usd: f64) -> Self {
        Self {
            currency,
            amount,
            price_usd,
        }
    }

    /// Holding priced from the static pricing table.
    pub fn at_reference_price(currency: Currency, amount: f64) -> Self {
        Self::new(currency, amount, currency.price_usd())
    }

    /// Value of this holding in USD at the pricing-table price, the same
    /// price swaps are quoted at.
    #[must_use]
    pub fn value_usd(&self) -> f64 {
        self.amount * self.currency.price_usd()
    }

    /// Display name from the pricing table.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.currency.info().name
    }
}
