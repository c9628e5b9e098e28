use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::errors::WalletError;

pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;
pub const KEY_LEN: usize = 32;

/// Argon2id cost parameters, written into every snapshot header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB
    pub memory_cost: u32,
    /// Iterations
    pub time_cost: u32,
    /// Lanes
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_cost: 19_456,
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl KdfParams {
    /// Bounds accepted when reading a snapshot, so a crafted header cannot
    /// request unbounded memory or time.
    pub fn check_bounds(&self) -> Result<(), WalletError> {
        let in_range = (8..=1_048_576).contains(&self.memory_cost)
            && (1..=20).contains(&self.time_cost)
            && (1..=16).contains(&self.parallelism);
        if in_range {
            Ok(())
        } else {
            Err(WalletError::InvalidFileFormat(format!(
                "KDF parameters out of range: m={} t={} p={}",
                self.memory_cost, self.time_cost, self.parallelism
            )))
        }
    }
}

/// Derive the snapshot key from a password with Argon2id.
pub fn derive_key(
    password: &str,
    salt: &[u8; SALT_LEN],
    params: &KdfParams,
) -> Result<[u8; KEY_LEN], WalletError> {
    let argon_params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| WalletError::Encryption(format!("Invalid Argon2 params: {e}")))?;

    let mut key = [0u8; KEY_LEN];
    Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params)
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| WalletError::Encryption(format!("Key derivation failed: {e}")))?;
    Ok(key)
}

fn cipher(key: &[u8; KEY_LEN]) -> Result<Aes256Gcm, WalletError> {
    Aes256Gcm::new_from_slice(key)
        .map_err(|e| WalletError::Encryption(format!("Failed to create cipher: {e}")))
}

/// AES-256-GCM encrypt; the 16-byte tag is appended to the output.
pub fn encrypt(
    plaintext: &[u8],
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
) -> Result<Vec<u8>, WalletError> {
    cipher(key)?
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|e| WalletError::Encryption(e.to_string()))
}

/// AES-256-GCM decrypt. A wrong key or tampered data yields `Decryption`.
pub fn decrypt(
    ciphertext: &[u8],
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
) -> Result<Vec<u8>, WalletError> {
    Ok(cipher(key)?.decrypt(Nonce::from_slice(nonce), ciphertext)?)
}

/// Fill an array with OS randomness.
pub fn random_bytes<const N: usize>() -> Result<[u8; N], WalletError> {
    let mut buf = [0u8; N];
    getrandom::getrandom(&mut buf)
        .map_err(|e| WalletError::Encryption(format!("Failed to gather randomness: {e}")))?;
    Ok(buf)
}
