use serde::{Deserialize, Serialize};

use crate::errors::WalletError;

/// Upper bound accepted for `max_term_days`.
pub const MAX_TERM_LIMIT_DAYS: u32 = 3650;

/// Artificial latency, in milliseconds, applied by the simulated backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDelays {
    pub send_ms: u64,
    pub swap_ms: u64,
    pub stake_ms: u64,
    pub deposit_ms: u64,
}

impl Default for OperationDelays {
    fn default() -> Self {
        Self {
            send_ms: 1000,
            swap_ms: 1000,
            stake_ms: 500,
            deposit_ms: 100,
        }
    }
}

impl OperationDelays {
    /// No latency at all (useful for tests and scripted demos).
    pub fn none() -> Self {
        Self {
            send_ms: 0,
            swap_ms: 0,
            stake_ms: 0,
            deposit_ms: 0,
        }
    }
}

/// User-configurable wallet settings, stored inside the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSettings {
    pub delays: OperationDelays,

    /// Term pre-selected when opening a new deposit
    pub default_deposit_term_days: u32,

    /// Duration pre-selected when opening a new stake
    pub default_stake_duration_days: u32,

    /// Longest accepted deposit term / stake duration
    pub max_term_days: u32,
}

impl Default for WalletSettings {
    fn default() -> Self {
        Self {
            delays: OperationDelays::default(),
            default_deposit_term_days: 60,
            default_stake_duration_days: 60,
            max_term_days: 365,
        }
    }
}

impl WalletSettings {
    /// Reject settings that would make every term invalid.
    pub fn validate(&self) -> Result<(), WalletError> {
        if self.max_term_days == 0 || self.max_term_days > MAX_TERM_LIMIT_DAYS {
            return Err(WalletError::InvalidSettings(format!(
                "max_term_days must be in 1..={MAX_TERM_LIMIT_DAYS}, got {}",
                self.max_term_days
            )));
        }
        for (label, days) in [
            ("default_deposit_term_days", self.default_deposit_term_days),
            ("default_stake_duration_days", self.default_stake_duration_days),
        ] {
            if days == 0 || days > self.max_term_days {
                return Err(WalletError::InvalidSettings(format!(
                    "{label} must be in 1..={}, got {days}",
                    self.max_term_days
                )));
            }
        }
        Ok(())
    }
}
