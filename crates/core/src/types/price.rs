//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display (e.g., "$19.99", "19.99 ر.س" or "1999.00 JPY").
    ///
    /// Currencies without a known symbol are shown with their ISO code.
    #[must_use]
    pub fn display(&self) -> String {
        let mut amount = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(2);
        match (self.currency_code, self.currency_code.symbol()) {
            (CurrencyCode::SAR | CurrencyCode::AED, Some(symbol)) => format!("{amount} {symbol}"),
            (_, Some(symbol)) => format!("{symbol}{amount}"),
            (code, None) => format!("{amount} {}", code.code()),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency code.
///
/// Currencies with a display symbol have their own variant. Any other
/// well-formed code is kept as `Other` and displayed by its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    SAR,
    AED,
    /// Uppercase ASCII code of a currency without a symbol.
    Other([u8; 3]),
}

impl CurrencyCode {
    /// Look up a currency by its ISO 4217 code (case-insensitive).
    ///
    /// Returns `None` unless the code is three ASCII letters.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let upper = code.trim().to_ascii_uppercase();
        let known = match upper.as_str() {
            "USD" => Self::USD,
            "EUR" => Self::EUR,
            "GBP" => Self::GBP,
            "CAD" => Self::CAD,
            "AUD" => Self::AUD,
            "SAR" => Self::SAR,
            "AED" => Self::AED,
            _ => {
                let bytes: [u8; 3] = upper.as_bytes().try_into().ok()?;
                if !bytes.iter().all(u8::is_ascii_uppercase) {
                    return None;
                }
                Self::Other(bytes)
            }
        };
        Some(known)
    }

    /// ISO 4217 code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
            Self::SAR => "SAR",
            Self::AED => "AED",
            // "XXX" is the ISO code for "no currency"
            Self::Other(bytes) => core::str::from_utf8(bytes).unwrap_or("XXX"),
        }
    }

    /// Display symbol, if the currency has one.
    #[must_use]
    pub const fn symbol(&self) -> Option<&'static str> {
        match self {
            Self::USD | Self::CAD | Self::AUD => Some("$"),
            Self::EUR => Some("€"),
            Self::GBP => Some("£"),
            Self::SAR => Some("ر.س"),
            Self::AED => Some("د.إ"),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Self::from_code(&code)
            .ok_or_else(|| de::Error::custom(format!("invalid currency code: {code}")))
    }
}
