use log::debug;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::errors::WalletError;
use crate::models::ledger::Ledger;

use super::repository::LedgerRepository;
use super::seed;

/// Ledger repository living in process memory.
///
/// A mutex serializes every read-modify-write, so an update always sees the
/// latest committed ledger.
#[derive(Debug, Default)]
pub struct InMemoryLedgerRepository {
    ledger: Mutex<Ledger>,
}

impl InMemoryLedgerRepository {
    /// Empty ledger with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with the demo seed data.
    pub fn seeded() -> Result<Self, WalletError> {
        Ok(Self::with_ledger(seed::seed_ledger()?))
    }

    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        // Updates run on a copy, so a poisoned ledger is still consistent.
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LedgerRepository for InMemoryLedgerRepository {
    fn ledger(&self) -> Ledger {
        self.lock().clone()
    }

    fn replace(&self, ledger: Ledger) {
        *self.lock() = ledger;
    }

    fn commit(
        &self,
        f: &mut dyn FnMut(&mut Ledger) -> Result<(), WalletError>,
    ) -> Result<(), WalletError> {
        let mut guard = self.lock();
        let mut draft = guard.clone();
        f(&mut draft)?;
        *guard = draft;
        debug!(
            "ledger committed: {} holdings, {} deposits, {} stakes, {} transactions",
            guard.holdings.len(),
            guard.deposits.len(),
            guard.stakes.len(),
            guard.transactions.len()
        );
        Ok(())
    }
}
