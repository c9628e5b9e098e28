use serde::{Deserialize, Serialize};

use super::currency::Currency;
use super::holding::Holding;
use super::position::{DepositPosition, StakePosition};
use super::settings::WalletSettings;
use super::transaction::Transaction;

/// The whole state of one simulated account. Everything in here is owned
/// by the ledger repository and is what gets written to a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub holdings: Vec<Holding>,

    pub deposits: Vec<DepositPosition>,

    pub stakes: Vec<StakePosition>,

    /// Newest first
    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub settings: WalletSettings,
}

impl Ledger {
    /// Current balance of `currency` (0 when no holding exists).
    #[must_use]
    pub fn balance_of(&self, currency: Currency) -> f64 {
        self.holdings
            .iter()
            .find(|h| h.currency == currency)
            .map(|h| h.amount)
            .unwrap_or(0.0)
    }

    /// Mutable holding for `currency`, created at the reference price if missing.
    pub fn holding_mut(&mut self, currency: Currency) -> &mut Holding {
        let idx = match self.holdings.iter().position(|h| h.currency == currency) {
            Some(idx) => idx,
            None => {
                self.holdings.push(Holding::at_reference_price(currency, 0.0));
                self.holdings.len() - 1
            }
        };
        &mut self.holdings[idx]
    }

    /// Prepend to the history so it stays newest-first.
    pub fn record(&mut self, transaction: Transaction) {
        self.transactions.insert(0, transaction);
    }
}
