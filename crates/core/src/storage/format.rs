use crate::errors::WalletError;

use super::encryption::{KdfParams, NONCE_LEN, SALT_LEN};

/// Magic bytes opening every wallet snapshot.
pub const MAGIC: &[u8; 4] = b"CWLT";

/// Current snapshot format version.
pub const CURRENT_VERSION: u16 = 1;

/// magic(4) + version(2) + kdf(12) + salt(16) + nonce(12) + payload_len(8)
pub const HEADER_LEN: usize = 4 + 2 + 12 + SALT_LEN + NONCE_LEN + 8;

/// Parsed snapshot header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub version: u16,
    pub kdf_params: KdfParams,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub payload_len: u64,
}

/// Frame an encrypted payload.
///
/// ```text
/// CWLT | version u16 | m u32 | t u32 | p u32 | salt[16] | nonce[12] | len u64 | payload
/// ```
/// All integers are little-endian.
pub fn encode(header: &SnapshotHeader, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&header.version.to_le_bytes());
    out.extend_from_slice(&header.kdf_params.memory_cost.to_le_bytes());
    out.extend_from_slice(&header.kdf_params.time_cost.to_le_bytes());
    out.extend_from_slice(&header.kdf_params.parallelism.to_le_bytes());
    out.extend_from_slice(&header.salt);
    out.extend_from_slice(&header.nonce);
    out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

/// Split snapshot bytes into header and encrypted payload.
pub fn decode(data: &[u8]) -> Result<(SnapshotHeader, &[u8]), WalletError> {
    if data.len() < HEADER_LEN {
        return Err(WalletError::InvalidFileFormat(format!(
            "snapshot is {} bytes, header alone needs {HEADER_LEN}",
            data.len()
        )));
    }

    let mut reader = Reader { data, pos: 0 };
    if reader.take::<4>()? != *MAGIC {
        return Err(WalletError::InvalidFileFormat(
            "not a wallet snapshot (bad magic)".into(),
        ));
    }

    let version = u16::from_le_bytes(reader.take()?);
    if version == 0 || version > CURRENT_VERSION {
        return Err(WalletError::UnsupportedVersion(version));
    }

    let kdf_params = KdfParams {
        memory_cost: u32::from_le_bytes(reader.take()?),
        time_cost: u32::from_le_bytes(reader.take()?),
        parallelism: u32::from_le_bytes(reader.take()?),
    };
    kdf_params.check_bounds()?;

    let salt = reader.take()?;
    let nonce = reader.take()?;
    let payload_len = u64::from_le_bytes(reader.take()?);

    let remaining = data.len() - reader.pos;
    let len = usize::try_from(payload_len)
        .ok()
        .filter(|len| *len <= remaining)
        .ok_or_else(|| {
            WalletError::InvalidFileFormat(format!(
                "snapshot truncated: header declares {payload_len} payload bytes, {remaining} present"
            ))
        })?;

    let header = SnapshotHeader {
        version,
        kdf_params,
        salt,
        nonce,
        payload_len,
    };
    Ok((header, &data[reader.pos..reader.pos + len]))
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N], WalletError> {
        let bytes = self
            .data
            .get(self.pos..self.pos + N)
            .and_then(|s| <[u8; N]>::try_from(s).ok())
            .ok_or_else(|| WalletError::InvalidFileFormat("unexpected end of header".into()))?;
        self.pos += N;
        Ok(bytes)
    }
}
