use log::{debug, warn};

use crate::errors::WalletError;
use crate::models::holding::Holding;
use crate::models::ledger::Ledger;
use crate::models::position::{DepositPosition, StakePosition};
use crate::models::settings::WalletSettings;
use crate::models::transaction::Transaction;

/// Typed access to the ledger collections.
///
/// Implementors provide `ledger`, `replace` and `commit`; the per-collection
/// accessors are derived from them. Every update function receives the
/// latest committed value, and `commit` is all-or-nothing: if the closure
/// fails, nothing it did is kept.
pub trait LedgerRepository: Send + Sync {
    /// Snapshot of the whole ledger.
    fn ledger(&self) -> Ledger;

    /// Overwrite the whole ledger.
    fn replace(&self, ledger: Ledger);

    /// Atomic read-modify-write over the whole ledger.
    fn commit(
        &self,
        f: &mut dyn FnMut(&mut Ledger) -> Result<(), WalletError>,
    ) -> Result<(), WalletError>;

    // ── Holdings ────────────────────────────────────────────────────

    fn holdings(&self) -> Vec<Holding> {
        self.ledger().holdings
    }

    fn set_holdings(&self, holdings: Vec<Holding>) {
        let mut holdings = Some(holdings);
        self.update_holdings(&mut |current| holdings.take().unwrap_or(current));
    }

    fn update_holdings(&self, f: &mut dyn FnMut(Vec<Holding>) -> Vec<Holding>) {
        if let Err(e) = self.commit(&mut |ledger| {
            ledger.holdings = f(std::mem::take(&mut ledger.holdings));
            Ok(())
        }) {
            warn!("holdings update not committed: {e}");
        }
    }

    // ── Deposits ────────────────────────────────────────────────────

    fn deposits(&self) -> Vec<DepositPosition> {
        self.ledger().deposits
    }

    fn set_deposits(&self, deposits: Vec<DepositPosition>) {
        let mut deposits = Some(deposits);
        self.update_deposits(&mut |current| deposits.take().unwrap_or(current));
    }

    fn update_deposits(&self, f: &mut dyn FnMut(Vec<DepositPosition>) -> Vec<DepositPosition>) {
        if let Err(e) = self.commit(&mut |ledger| {
            ledger.deposits = f(std::mem::take(&mut ledger.deposits));
            Ok(())
        }) {
            warn!("deposits update not committed: {e}");
        }
    }

    // ── Stakes ──────────────────────────────────────────────────────

    fn stakes(&self) -> Vec<StakePosition> {
        self.ledger().stakes
    }

    fn set_stakes(&self, stakes: Vec<StakePosition>) {
        let mut stakes = Some(stakes);
        self.update_stakes(&mut |current| stakes.take().unwrap_or(current));
    }

    fn update_stakes(&self, f: &mut dyn FnMut(Vec<StakePosition>) -> Vec<StakePosition>) {
        if let Err(e) = self.commit(&mut |ledger| {
            ledger.stakes = f(std::mem::take(&mut ledger.stakes));
            Ok(())
        }) {
            warn!("stakes update not committed: {e}");
        }
    }

    // ── Transactions ────────────────────────────────────────────────

    /// History, newest first.
    fn transactions(&self) -> Vec<Transaction> {
        self.ledger().transactions
    }

    fn set_transactions(&self, transactions: Vec<Transaction>) {
        let mut transactions = Some(transactions);
        self.update_transactions(&mut |current| transactions.take().unwrap_or(current));
    }

    fn update_transactions(&self, f: &mut dyn FnMut(Vec<Transaction>) -> Vec<Transaction>) {
        if let Err(e) = self.commit(&mut |ledger| {
            ledger.transactions = f(std::mem::take(&mut ledger.transactions));
            Ok(())
        }) {
            warn!("transactions update not committed: {e}");
        }
    }

    // ── Settings ────────────────────────────────────────────────────

    fn settings(&self) -> WalletSettings {
        self.ledger().settings
    }

    fn set_settings(&self, settings: WalletSettings) {
        let mut settings = Some(settings);
        if let Err(e) = self.commit(&mut |ledger| {
            if let Some(s) = settings.take() {
                ledger.settings = s;
            }
            Ok(())
        }) {
            warn!("settings update not committed: {e}");
        }
    }
}

impl dyn LedgerRepository {
    /// Run `f` inside [`LedgerRepository::commit`] and hand back its result.
    pub fn transact<T>(
        &self,
        f: impl FnOnce(&mut Ledger) -> Result<T, WalletError>,
    ) -> Result<T, WalletError> {
        let mut f = Some(f);
        let mut output = None;
        self.commit(&mut |ledger| {
            if let Some(f) = f.take() {
                output = Some(f(ledger)?);
            }
            Ok(())
        })?;
        debug!("ledger transaction committed");
        output.ok_or_else(|| WalletError::Backend {
            backend: "repository".into(),
            message: "commit did not run the update".into(),
        })
    }
}
