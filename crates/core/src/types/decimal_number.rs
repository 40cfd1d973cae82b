//! Serde helpers for decimals written as JSON numbers.
//!
//! The wholesale metafield stores `bulkPrice` as a plain JSON number, while
//! records written by earlier versions of the tool hold a numeric string.
//! Use with `#[serde(with = "crate::types::decimal_number")]`.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserializer, Serializer, de};

/// Serialize a decimal as a JSON number.
///
/// Whole amounts are written as integers (`50`), others as floats (`49.99`).
///
/// # Errors
///
/// Returns an error if the decimal does not fit an `f64`.
pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract().is_zero()
        && let Some(whole) = value.to_i64()
    {
        return serializer.serialize_i64(whole);
    }

    let float = value
        .to_f64()
        .ok_or_else(|| serde::ser::Error::custom(format!("{value} does not fit a JSON number")))?;
    serializer.serialize_f64(float)
}

/// Deserialize a decimal from a JSON number or a numeric string.
///
/// # Errors
///
/// Returns an error if the value is neither a number nor a numeric string.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    deserializer.deserialize_any(DecimalVisitor)
}

/// Parse a decimal from operator input or a stored string.
///
/// Accepts plain (`"12.50"`) and scientific (`"1.25e1"`) notation.
///
/// # Errors
///
/// Returns `rust_decimal::Error` if the input is not a number.
pub fn parse(input: &str) -> Result<Decimal, rust_decimal::Error> {
    let input = input.trim();
    Decimal::from_str(input).or_else(|_| Decimal::from_scientific(input))
}

struct DecimalVisitor;

impl de::Visitor<'_> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
        // Display of f64 is the shortest round-trip form, so 49.99 stays 49.99
        parse(&v.to_string()).map_err(|_| E::custom(format!("invalid decimal: {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
        parse(v).map_err(|_| E::custom(format!("invalid decimal: {v:?}")))
    }
}
