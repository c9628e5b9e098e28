pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::{DateTime, Utc};
use log::{info, warn};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use errors::WalletError;
use models::{
    currency::Currency,
    holding::Holding,
    ledger::Ledger,
    position::{DepositPosition, StakePosition},
    settings::WalletSettings,
    status::{DepositStatus, StakeStatus},
    summary::WalletSummary,
    transaction::{Transaction, TransactionType},
};
use providers::{
    simulated::SimulatedBackend,
    traits::{OperationBackend, OperationKind},
};
use services::{
    address_service::AddressService, position_service::PositionService, rates,
    summary_service::SummaryService, wallet_service::WalletService,
};
use storage::{
    manager::SnapshotManager, memory::InMemoryLedgerRepository, repository::LedgerRepository,
};

/// Main entry point for the wallet core.
///
/// Reads go straight to the ledger repository. User operations are
/// validated, submitted to the operation backend, and then committed to the
/// repository in one atomic step.
#[must_use]
pub struct CryptoWallet {
    repository: Arc<dyn LedgerRepository>,
    backend: Arc<dyn OperationBackend>,
    /// `false` while the backend is the simulated one built from settings.
    custom_backend: bool,
    wallet_service: WalletService,
    position_service: PositionService,
    summary_service: SummaryService,
    address_service: AddressService,
}

impl std::fmt::Debug for CryptoWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ledger = self.repository.ledger();
        f.debug_struct("CryptoWallet")
            .field("holdings", &ledger.holdings.len())
            .field("deposits", &ledger.deposits.len())
            .field("stakes", &ledger.stakes.len())
            .field("transactions", &ledger.transactions.len())
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl CryptoWallet {
    /// Wallet over an existing repository, using the simulated backend
    /// configured from the repository's settings.
    pub fn new(repository: Arc<dyn LedgerRepository>) -> Self {
        let backend = Arc::new(SimulatedBackend::new(repository.settings().delays));
        Self::build(repository, backend, false)
    }

    /// Wallet with an explicit backend (e.g. a real service client).
    pub fn with_backend(
        repository: Arc<dyn LedgerRepository>,
        backend: Arc<dyn OperationBackend>,
    ) -> Self {
        Self::build(repository, backend, true)
    }

    /// Empty in-memory wallet with default settings.
    pub fn create_new() -> Self {
        Self::new(Arc::new(InMemoryLedgerRepository::new()))
    }

    /// In-memory wallet pre-filled with the demo seed data.
    pub fn demo() -> Result<Self, WalletError> {
        Ok(Self::new(Arc::new(InMemoryLedgerRepository::seeded()?)))
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// All holdings, including exhausted ones.
    #[must_use]
    pub fn holdings(&self) -> Vec<Holding> {
        self.repository.holdings()
    }

    /// Holdings with a positive balance (the ones that can be spent).
    #[must_use]
    pub fn available_holdings(&self) -> Vec<Holding> {
        self.repository
            .holdings()
            .into_iter()
            .filter(|h| h.amount > 0.0)
            .collect()
    }

    #[must_use]
    pub fn balance_of(&self, currency: Currency) -> f64 {
        self.repository.ledger().balance_of(currency)
    }

    // ── Positions ───────────────────────────────────────────────────

    #[must_use]
    pub fn deposits(&self) -> Vec<DepositPosition> {
        self.repository.deposits()
    }

    #[must_use]
    pub fn stakes(&self) -> Vec<StakePosition> {
        self.repository.stakes()
    }

    #[must_use]
    pub fn get_deposit(&self, id: Uuid) -> Option<DepositPosition> {
        self.repository.deposits().into_iter().find(|d| d.id == id)
    }

    #[must_use]
    pub fn get_stake(&self, id: Uuid) -> Option<StakePosition> {
        self.repository.stakes().into_iter().find(|s| s.id == id)
    }

    /// Lifecycle and accrued interest of one deposit at `now`.
    pub fn deposit_status(&self, id: Uuid, now: DateTime<Utc>) -> Result<DepositStatus, WalletError> {
        let deposit = self
            .get_deposit(id)
            .ok_or_else(|| WalletError::PositionNotFound(id.to_string()))?;
        Ok(self.position_service.deposit_status(&deposit, now))
    }

    /// Lifecycle and accrued rewards of one stake at `now`.
    pub fn stake_status(&self, id: Uuid, now: DateTime<Utc>) -> Result<StakeStatus, WalletError> {
        let stake = self
            .get_stake(id)
            .ok_or_else(|| WalletError::PositionNotFound(id.to_string()))?;
        Ok(self.position_service.stake_status(&stake, now))
    }

    #[must_use]
    pub fn active_deposits(&self, now: DateTime<Utc>) -> Vec<DepositStatus> {
        self.position_service
            .active_deposits(&self.repository.ledger(), now)
    }

    #[must_use]
    pub fn matured_deposits(&self, now: DateTime<Utc>) -> Vec<DepositStatus> {
        self.position_service
            .matured_deposits(&self.repository.ledger(), now)
    }

    #[must_use]
    pub fn active_stakes(&self, now: DateTime<Utc>) -> Vec<StakeStatus> {
        self.position_service
            .active_stakes(&self.repository.ledger(), now)
    }

    #[must_use]
    pub fn completed_stakes(&self, now: DateTime<Utc>) -> Vec<StakeStatus> {
        self.position_service
            .completed_stakes(&self.repository.ledger(), now)
    }

    /// Dashboard totals at `now`.
    #[must_use]
    pub fn summary(&self, now: DateTime<Utc>) -> WalletSummary {
        self.summary_service.summary(&self.repository.ledger(), now)
    }

    /// Dashboard totals as of this instant.
    #[must_use]
    pub fn current_summary(&self) -> WalletSummary {
        self.summary(Utc::now())
    }

    // ── Quotes ──────────────────────────────────────────────────────

    /// (APY, interest at maturity) for a prospective deposit.
    #[must_use]
    pub fn quote_deposit(&self, currency: Currency, amount: f64, term_days: u32) -> (f64, f64) {
        self.wallet_service.quote_deposit(currency, amount, term_days)
    }

    /// (APY, projected rewards) for a prospective stake.
    #[must_use]
    pub fn quote_stake(&self, currency: Currency, amount: f64, duration_days: u32) -> (f64, f64) {
        self.wallet_service.quote_stake(currency, amount, duration_days)
    }

    /// Amount of `to` received for `amount` of `from`.
    #[must_use]
    pub fn quote_swap(&self, from: Currency, to: Currency, amount: f64) -> f64 {
        rates::swap_quote(from, to, amount)
    }

    // ── User Operations ─────────────────────────────────────────────

    /// Open a term deposit.
    pub async fn create_deposit(
        &self,
        currency: Currency,
        amount: f64,
        term_days: u32,
        cancel: &CancellationToken,
    ) -> Result<DepositPosition, WalletError> {
        let ledger = self.repository.ledger();
        self.precheck(
            self.wallet_service
                .check_deposit(&ledger, currency, amount, term_days),
        )?;
        self.submit(OperationKind::Deposit, cancel).await?;
        self.repository.transact(|ledger| {
            self.wallet_service
                .apply_deposit(ledger, currency, amount, term_days, Utc::now())
        })
    }

    /// Open a staking position.
    pub async fn create_stake(
        &self,
        currency: Currency,
        amount: f64,
        duration_days: u32,
        cancel: &CancellationToken,
    ) -> Result<StakePosition, WalletError> {
        let ledger = self.repository.ledger();
        self.precheck(
            self.wallet_service
                .check_stake(&ledger, currency, amount, duration_days),
        )?;
        self.submit(OperationKind::Stake, cancel).await?;
        self.repository.transact(|ledger| {
            self.wallet_service
                .apply_stake(ledger, currency, amount, duration_days, Utc::now())
        })
    }

    /// Close a stake early or after completion, paying out principal plus
    /// rewards accrued so far.
    pub async fn unstake(
        &self,
        stake_id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<Transaction, WalletError> {
        let ledger = self.repository.ledger();
        self.precheck(self.wallet_service.check_unstake(&ledger, stake_id))?;
        self.submit(OperationKind::Unstake, cancel).await?;
        self.repository.transact(|ledger| {
            self.wallet_service
                .apply_unstake(ledger, stake_id, Utc::now())
        })
    }

    /// Send funds to an external address.
    pub async fn send(
        &self,
        currency: Currency,
        amount: f64,
        address: &str,
        cancel: &CancellationToken,
    ) -> Result<Transaction, WalletError> {
        let ledger = self.repository.ledger();
        self.precheck(
            self.wallet_service
                .check_send(&ledger, currency, amount, address),
        )?;
        self.submit(OperationKind::Send, cancel).await?;
        self.repository.transact(|ledger| {
            self.wallet_service
                .apply_send(ledger, currency, amount, address, Utc::now())
        })
    }

    /// Exchange one currency for another at reference prices.
    pub async fn swap(
        &self,
        from: Currency,
        to: Currency,
        amount: f64,
        cancel: &CancellationToken,
    ) -> Result<Transaction, WalletError> {
        let ledger = self.repository.ledger();
        self.precheck(self.wallet_service.check_swap(&ledger, from, to, amount))?;
        self.submit(OperationKind::Swap, cancel).await?;
        self.repository.transact(|ledger| {
            self.wallet_service
                .apply_swap(ledger, from, to, amount, Utc::now())
        })
    }

    /// A fresh demo receive address. Nothing is recorded.
    pub fn receive_address(&self, currency: Currency) -> Result<String, WalletError> {
        self.address_service.generate(currency)
    }

    // ── History ─────────────────────────────────────────────────────

    /// Full history, newest first.
    #[must_use]
    pub fn transactions(&self) -> Vec<Transaction> {
        let mut txs = self.repository.transactions();
        txs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        txs
    }

    /// History filtered by type, newest first.
    #[must_use]
    pub fn transactions_by_type(&self, kind: TransactionType) -> Vec<Transaction> {
        self.transactions()
            .into_iter()
            .filter(|t| t.kind == kind)
            .collect()
    }

    /// History touching `currency` on either side, newest first.
    #[must_use]
    pub fn transactions_for_currency(&self, currency: Currency) -> Vec<Transaction> {
        self.transactions()
            .into_iter()
            .filter(|t| t.currency == currency || t.to_currency == Some(currency))
            .collect()
    }

    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.repository.transactions().len()
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> WalletSettings {
        self.repository.settings()
    }

    /// Replace the settings. Rebuilds the simulated backend so new delays
    /// take effect immediately; a custom backend is left alone.
    pub fn set_settings(&mut self, settings: WalletSettings) -> Result<(), WalletError> {
        settings.validate()?;
        if !self.custom_backend {
            self.backend = Arc::new(SimulatedBackend::new(settings.delays.clone()));
        }
        self.repository.set_settings(settings);
        Ok(())
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export the history as a JSON string (newest first).
    pub fn export_transactions_to_json(&self) -> Result<String, WalletError> {
        serde_json::to_string_pretty(&self.transactions()).map_err(|e| {
            WalletError::Serialization(format!("Failed to serialize transactions to JSON: {e}"))
        })
    }

    /// Export the history as CSV.
    /// Columns: id, type, timestamp, amount, currency, to_currency, to_amount, address, status
    #[must_use]
    pub fn export_transactions_to_csv(&self) -> String {
        let mut csv =
            String::from("id,type,timestamp,amount,currency,to_currency,to_amount,address,status\n");
        for tx in self.transactions() {
            let address = tx.address.as_deref().unwrap_or("");
            let escaped_address = if address.contains(',') || address.contains('"') {
                format!("\"{}\"", address.replace('"', "\"\""))
            } else {
                address.to_string()
            };
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{}\n",
                tx.id,
                tx.kind,
                tx.timestamp.to_rfc3339(),
                tx.amount,
                tx.currency,
                tx.to_currency.map(|c| c.to_string()).unwrap_or_default(),
                tx.to_amount.map(|a| a.to_string()).unwrap_or_default(),
                escaped_address,
                tx.status,
            ));
        }
        csv
    }

    /// Merge transactions from JSON into the history. Entries whose id is
    /// already present are skipped. Returns the number added.
    pub fn import_transactions_from_json(&self, json: &str) -> Result<usize, WalletError> {
        let incoming: Vec<Transaction> = serde_json::from_str(json)?;
        let added = self.repository.transact(|ledger| {
            let mut added = 0;
            for tx in incoming {
                if ledger.transactions.iter().all(|t| t.id != tx.id) {
                    ledger.transactions.push(tx);
                    added += 1;
                }
            }
            ledger
                .transactions
                .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            Ok(added)
        })?;
        info!("imported {added} transactions");
        Ok(added)
    }

    // ── Snapshots ───────────────────────────────────────────────────

    /// Encrypt the whole ledger with `password`.
    pub fn save_snapshot(&self, password: &str) -> Result<Vec<u8>, WalletError> {
        SnapshotManager::save_to_bytes(&self.repository.ledger(), password)
    }

    /// Replace the ledger with a decrypted snapshot.
    pub fn load_snapshot(&mut self, data: &[u8], password: &str) -> Result<(), WalletError> {
        let ledger = SnapshotManager::load_from_bytes(data, password)?;
        self.restore(ledger);
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_snapshot_to_file(&self, path: &str, password: &str) -> Result<(), WalletError> {
        SnapshotManager::save_to_file(&self.repository.ledger(), path, password)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_snapshot_from_file(&mut self, path: &str, password: &str) -> Result<(), WalletError> {
        let ledger = SnapshotManager::load_from_file(path, password)?;
        self.restore(ledger);
        Ok(())
    }

    /// Unencrypted JSON dump of the ledger (debugging/display).
    pub fn to_json(&self) -> Result<String, WalletError> {
        serde_json::to_string_pretty(&self.repository.ledger())
            .map_err(|e| WalletError::Serialization(format!("Failed to serialize ledger: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(
        repository: Arc<dyn LedgerRepository>,
        backend: Arc<dyn OperationBackend>,
        custom_backend: bool,
    ) -> Self {
        Self {
            repository,
            backend,
            custom_backend,
            wallet_service: WalletService::new(),
            position_service: PositionService::new(),
            summary_service: SummaryService::new(),
            address_service: AddressService::new(),
        }
    }

    fn restore(&mut self, ledger: Ledger) {
        if !self.custom_backend {
            self.backend = Arc::new(SimulatedBackend::new(ledger.settings.delays.clone()));
        }
        self.repository.replace(ledger);
    }

    fn precheck(&self, result: Result<(), WalletError>) -> Result<(), WalletError> {
        result.inspect_err(|e| warn!("operation rejected before submission: {e}"))
    }

    async fn submit(
        &self,
        kind: OperationKind,
        cancel: &CancellationToken,
    ) -> Result<(), WalletError> {
        self.backend.submit(kind, cancel).await.inspect_err(|e| {
            warn!("{kind} not committed ({} backend): {e}", self.backend.name())
        })
    }
}
