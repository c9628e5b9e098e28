use async_trait::async_trait;
use log::{debug, warn};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::errors::WalletError;
use crate::models::settings::OperationDelays;

use super::traits::{OperationBackend, OperationKind};

/// Backend that acknowledges every operation after a fixed delay.
///
/// Never fails on its own; the only error it returns is `Cancelled`.
pub struct SimulatedBackend {
    delays: OperationDelays,
}

impl SimulatedBackend {
    pub fn new(delays: OperationDelays) -> Self {
        Self { delays }
    }

    /// Delay applied to `kind`. Unstaking shares the stake latency.
    pub fn delay_for(&self, kind: OperationKind) -> Duration {
        let ms = match kind {
            OperationKind::Send => self.delays.send_ms,
            OperationKind::Swap => self.delays.swap_ms,
            OperationKind::Stake | OperationKind::Unstake => self.delays.stake_ms,
            OperationKind::Deposit => self.delays.deposit_ms,
        };
        Duration::from_millis(ms)
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(OperationDelays::default())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl OperationBackend for SimulatedBackend {
    fn name(&self) -> &str {
        "Simulated"
    }

    async fn submit(
        &self,
        kind: OperationKind,
        cancel: &CancellationToken,
    ) -> Result<(), WalletError> {
        if cancel.is_cancelled() {
            warn!("{kind} cancelled before submission");
            return Err(WalletError::Cancelled);
        }

        let delay = self.delay_for(kind);
        debug!("simulating {kind} with {delay:?} latency");

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("{kind} cancelled during simulated latency");
                Err(WalletError::Cancelled)
            }
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }
}
