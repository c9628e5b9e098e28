use serde::{Deserialize, Serialize};

use super::position::{DepositPosition, StakePosition};

/// Lifecycle state of a deposit or stake. The only transition is
/// Active → Matured, taken when `now` reaches the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionState {
    Active,
    Matured,
}

impl std::fmt::Display for PositionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionState::Active => write!(f, "Active"),
            PositionState::Matured => write!(f, "Matured"),
        }
    }
}

/// Derived lifecycle figures for a (start, end) pair at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lifecycle {
    pub state: PositionState,

    /// Progress to maturity in percent, 0..=100
    pub progress: f64,

    /// Whole days since start (floored)
    pub days_elapsed: i64,

    /// Whole days until the end (ceiled); 0 once matured
    pub days_remaining: i64,
}

impl Lifecycle {
    #[must_use]
    pub fn is_matured(&self) -> bool {
        self.state == PositionState::Matured
    }
}

/// A deposit together with its derived state at a given instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositStatus {
    pub deposit: DepositPosition,

    pub lifecycle: Lifecycle,

    /// Interest accrued so far (capped at the term)
    pub accrued_interest: f64,

    /// Principal plus stored interest
    pub total_at_maturity: f64,
}

/// A stake together with its derived state at a given instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeStatus {
    pub stake: StakePosition,

    pub lifecycle: Lifecycle,

    /// Rewards accrued so far (capped at the duration)
    pub accrued_rewards: f64,
}
