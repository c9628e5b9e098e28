use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::errors::WalletError;

/// The user operations that go through a backend before being committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Send,
    Swap,
    Stake,
    Unstake,
    Deposit,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Send => write!(f, "send"),
            OperationKind::Swap => write!(f, "swap"),
            OperationKind::Stake => write!(f, "stake"),
            OperationKind::Unstake => write!(f, "unstake"),
            OperationKind::Deposit => write!(f, "deposit"),
        }
    }
}

/// Seam between the wallet and whatever processes its operations.
///
/// The wallet validates an operation, submits it here, and commits it to
/// the ledger only once `submit` returns `Ok`. A real backend can replace
/// the simulated one without touching any call site.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait OperationBackend: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// Process an operation. Must return `WalletError::Cancelled` if
    /// `cancel` fires before the operation is acknowledged.
    async fn submit(&self, kind: OperationKind, cancel: &CancellationToken)
        -> Result<(), WalletError>;
}
