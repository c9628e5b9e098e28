use thiserror::Error;

use crate::models::currency::Currency;

/// Unified error type for the wallet core.
/// Every public function returns `Result<T, WalletError>`.
#[derive(Debug, Error)]
pub enum WalletError {
    // ── User input validation ───────────────────────────────────────
    #[error("Enter an amount")]
    EmptyAmount,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(f64),

    #[error("Insufficient {currency} balance: requested {requested}, available {available}")]
    InsufficientBalance {
        currency: Currency,
        requested: f64,
        available: f64,
    },

    #[error("Select different currencies (both sides are {0})")]
    SameCurrencySwap(Currency),

    #[error("Staking not available for {0}")]
    StakingUnavailable(Currency),

    #[error("Recipient address is required")]
    MissingAddress,

    #[error("Invalid duration: {days} days (expected 1..={max})")]
    InvalidDuration { days: u32, max: u32 },

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    // ── Computation guards ──────────────────────────────────────────
    #[error("Invalid date range: {start} .. {end} spans less than one day")]
    InvalidDateRange { start: String, end: String },

    #[error("Principal must be greater than zero")]
    ZeroPrincipal,

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    // ── Lookups ─────────────────────────────────────────────────────
    #[error("Position not found: {0}")]
    PositionNotFound(String),

    // ── Async operations ────────────────────────────────────────────
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Backend error ({backend}): {message}")]
    Backend { backend: String, message: String },

    // ── Snapshot storage ────────────────────────────────────────────
    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported file version: {0}")]
    UnsupportedVersion(u16),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed: wrong password or corrupted snapshot")]
    Decryption,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),
}

impl WalletError {
    /// `true` for errors caused by user input. These are shown as a
    /// transient notification and leave the ledger untouched.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WalletError::EmptyAmount
                | WalletError::InvalidAmount(_)
                | WalletError::NonPositiveAmount(_)
                | WalletError::InsufficientBalance { .. }
                | WalletError::SameCurrencySwap(_)
                | WalletError::StakingUnavailable(_)
                | WalletError::MissingAddress
                | WalletError::InvalidDuration { .. }
                | WalletError::UnknownCurrency(_)
                | WalletError::InvalidSettings(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for WalletError {
    fn from(e: std::io::Error) -> Self {
        WalletError::FileIO(e.to_string())
    }
}

impl From<bincode::Error> for WalletError {
    fn from(e: bincode::Error) -> Self {
        WalletError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(e: serde_json::Error) -> Self {
        WalletError::Deserialization(e.to_string())
    }
}

impl From<aes_gcm::Error> for WalletError {
    fn from(_: aes_gcm::Error) -> Self {
        WalletError::Decryption
    }
}
