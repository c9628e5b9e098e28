use log::info;

use crate::errors::WalletError;
use crate::models::ledger::Ledger;

use super::encryption::{self, KdfParams};
use super::format::{self, SnapshotHeader, CURRENT_VERSION};

/// Password-protected ledger snapshots.
pub struct SnapshotManager;

impl SnapshotManager {
    /// Ledger → bincode → AES-256-GCM(Argon2id(password)) → CWLT bytes.
    pub fn save_to_bytes(ledger: &Ledger, password: &str) -> Result<Vec<u8>, WalletError> {
        Self::save_with_params(ledger, password, KdfParams::default())
    }

    /// Same as [`Self::save_to_bytes`] with explicit KDF costs.
    pub fn save_with_params(
        ledger: &Ledger,
        password: &str,
        kdf_params: KdfParams,
    ) -> Result<Vec<u8>, WalletError> {
        let plaintext = bincode::serialize(ledger)
            .map_err(|e| WalletError::Serialization(format!("Failed to serialize ledger: {e}")))?;

        let salt = encryption::random_bytes()?;
        let nonce = encryption::random_bytes()?;
        let key = encryption::derive_key(password, &salt, &kdf_params)?;
        let ciphertext = encryption::encrypt(&plaintext, &key, &nonce)?;

        let header = SnapshotHeader {
            version: CURRENT_VERSION,
            kdf_params,
            salt,
            nonce,
            payload_len: ciphertext.len() as u64,
        };

        info!(
            "ledger snapshot written: {} deposits, {} stakes, {} transactions",
            ledger.deposits.len(),
            ledger.stakes.len(),
            ledger.transactions.len()
        );
        Ok(format::encode(&header, &ciphertext))
    }

    /// CWLT bytes → header → Argon2id → AES-256-GCM → bincode → Ledger.
    pub fn load_from_bytes(data: &[u8], password: &str) -> Result<Ledger, WalletError> {
        let (header, ciphertext) = format::decode(data)?;
        let key = encryption::derive_key(password, &header.salt, &header.kdf_params)?;
        let plaintext = encryption::decrypt(ciphertext, &key, &header.nonce)?;
        bincode::deserialize(&plaintext)
            .map_err(|e| WalletError::Deserialization(format!("Failed to deserialize ledger: {e}")))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(ledger: &Ledger, path: &str, password: &str) -> Result<(), WalletError> {
        let bytes = Self::save_to_bytes(ledger, password)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str, password: &str) -> Result<Ledger, WalletError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes, password)
    }
}
