use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::WalletError;

/// The closed set of currencies the wallet supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    BTC,
    ETH,
    USDT,
    TRX,
    TON,
    BNB,
    SOL,
    XRP,
}

/// Static display and pricing data for a currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyInfo {
    /// Human-readable name (e.g., "Bitcoin")
    pub name: &'static str,

    /// Reference unit price in USD
    pub price_usd: f64,

    /// Display color (oklch CSS string)
    pub color: &'static str,

    /// Glyph shown next to amounts; the ticker when the currency has none
    pub glyph: &'static str,
}

impl Currency {
    /// Every supported currency, in display order.
    pub const ALL: [Currency; 8] = [
        Currency::BTC,
        Currency::ETH,
        Currency::USDT,
        Currency::TRX,
        Currency::TON,
        Currency::BNB,
        Currency::SOL,
        Currency::XRP,
    ];

    /// Pricing table lookup. Total over the enum, so it can never miss.
    #[must_use]
    pub const fn info(self) -> CurrencyInfo {
        match self {
            Currency::BTC => CurrencyInfo {
                name: "Bitcoin",
                price_usd: 43_250.0,
                color: "oklch(0.65 0.18 35)",
                glyph: "₿",
            },
            Currency::ETH => CurrencyInfo {
                name: "Ethereum",
                price_usd: 2_280.0,
                color: "oklch(0.60 0.15 260)",
                glyph: "Ξ",
            },
            Currency::USDT => CurrencyInfo {
                name: "Tether",
                price_usd: 1.0,
                color: "oklch(0.65 0.15 145)",
                glyph: "₮",
            },
            Currency::TRX => CurrencyInfo {
                name: "Tron",
                price_usd: 0.12,
                color: "oklch(0.60 0.18 10)",
                glyph: "TRX",
            },
            Currency::TON => CurrencyInfo {
                name: "Toncoin",
                price_usd: 5.45,
                color: "oklch(0.65 0.15 210)",
                glyph: "TON",
            },
            Currency::BNB => CurrencyInfo {
                name: "BNB",
                price_usd: 315.0,
                color: "oklch(0.70 0.18 80)",
                glyph: "BNB",
            },
            Currency::SOL => CurrencyInfo {
                name: "Solana",
                price_usd: 98.0,
                color: "oklch(0.65 0.20 290)",
                glyph: "SOL",
            },
            Currency::XRP => CurrencyInfo {
                name: "XRP",
                price_usd: 0.52,
                color: "oklch(0.60 0.12 220)",
                glyph: "XRP",
            },
        }
    }

    /// Reference USD price from the pricing table.
    #[must_use]
    pub const fn price_usd(self) -> f64 {
        self.info().price_usd
    }

    /// Ticker symbol (e.g., "BTC").
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::BTC => "BTC",
            Currency::ETH => "ETH",
            Currency::USDT => "USDT",
            Currency::TRX => "TRX",
            Currency::TON => "TON",
            Currency::BNB => "BNB",
            Currency::SOL => "SOL",
            Currency::XRP => "XRP",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Currency {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.symbol() == upper)
            .ok_or_else(|| WalletError::UnknownCurrency(s.to_string()))
    }
}
