use crate::errors::WalletError;
use crate::models::currency::Currency;

const BASE58_CHARS: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const HEX_CHARS: &[u8] = b"0123456789abcdef";

/// Generates demo receive addresses. They look plausible for the chain
/// but are random and not backed by any key.
pub struct AddressService;

impl AddressService {
    pub fn new() -> Self {
        Self
    }

    /// Address prefix and total length for `currency`.
    #[must_use]
    pub fn format_for(currency: Currency) -> (&'static str, usize) {
        match currency {
            Currency::BTC => ("1", 34),
            Currency::ETH => ("0x", 42),
            Currency::USDT => ("0x", 42),
            Currency::TRX => ("T", 34),
            Currency::TON => ("EQ", 48),
            Currency::BNB => ("bnb", 42),
            Currency::SOL => ("", 44),
            Currency::XRP => ("r", 34),
        }
    }

    /// Generate a fresh random address for `currency`.
    pub fn generate(&self, currency: Currency) -> Result<String, WalletError> {
        let (prefix, total_len) = Self::format_for(currency);
        let charset = match currency {
            Currency::ETH | Currency::USDT => HEX_CHARS,
            _ => BASE58_CHARS,
        };

        let mut random = vec![0u8; total_len - prefix.len()];
        getrandom::getrandom(&mut random).map_err(|e| WalletError::Backend {
            backend: "address".into(),
            message: format!("Failed to generate random address: {e}"),
        })?;

        let mut address = String::with_capacity(total_len);
        address.push_str(prefix);
        address.extend(
            random
                .iter()
                .map(|b| char::from(charset[usize::from(*b) % charset.len()])),
        );
        Ok(address)
    }
}

impl Default for AddressService {
    fn default() -> Self {
        Self::new()
    }
}
