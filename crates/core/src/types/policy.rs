//! The wholesale policy stored on each product.
//!
//! A policy is a `{bulkQuantity, bulkPrice}` pair persisted as a JSON-typed
//! product metafield under the `wholesale` namespace. A product without the
//! metafield has no policy, which prices exactly like a disabled one.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Metafield namespace that holds the wholesale policy.
pub const METAFIELD_NAMESPACE: &str = "wholesale";

/// Default metafield key for the policy.
pub const DEFAULT_METAFIELD_KEY: &str = "bulk";

/// Errors that can occur when building or parsing a [`WholesalePolicy`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// Bulk quantity below zero.
    #[error("bulkQuantity must not be negative (got {0})")]
    NegativeQuantity(i64),
    /// Bulk quantity above the supported maximum.
    #[error("bulkQuantity must be at most {max} (got {got})")]
    QuantityTooLarge {
        /// Largest accepted quantity.
        max: u32,
        /// The rejected value.
        got: i64,
    },
    /// Bulk price below zero.
    #[error("bulkPrice must not be negative (got {0})")]
    NegativePrice(Decimal),
    /// The stored metafield value is not a policy.
    #[error("malformed wholesale metafield: {0}")]
    Malformed(String),
}

/// Quantity threshold and unit price for wholesale orders.
///
/// `bulk_quantity == 0` disables the policy: the regular price always applies.
///
/// ## Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use wholesale_core::WholesalePolicy;
///
/// let policy = WholesalePolicy::new(10, Decimal::new(50, 0)).unwrap();
/// assert!(policy.is_enabled());
/// assert_eq!(policy.to_metafield_value(), r#"{"bulkQuantity":10,"bulkPrice":50}"#);
///
/// assert!(WholesalePolicy::new(-1, Decimal::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WholesalePolicy {
    /// Minimum quantity that unlocks the bulk price.
    #[serde(default)]
    pub bulk_quantity: u32,
    /// Unit price charged at or above the threshold.
    #[serde(default, with = "crate::types::decimal_number")]
    pub bulk_price: Decimal,
}

impl WholesalePolicy {
    /// A policy that never applies.
    pub const DISABLED: Self = Self {
        bulk_quantity: 0,
        bulk_price: Decimal::ZERO,
    };

    /// Build a policy from operator input.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError` if either value is negative or the quantity does
    /// not fit a `u32`.
    pub fn new(bulk_quantity: i64, bulk_price: Decimal) -> Result<Self, PolicyError> {
        if bulk_quantity < 0 {
            return Err(PolicyError::NegativeQuantity(bulk_quantity));
        }
        let bulk_quantity =
            u32::try_from(bulk_quantity).map_err(|_| PolicyError::QuantityTooLarge {
                max: u32::MAX,
                got: bulk_quantity,
            })?;

        Self {
            bulk_quantity,
            bulk_price,
        }
        .validated()
    }

    /// Whether the bulk price can ever apply.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.bulk_quantity > 0
    }

    /// Parse the JSON value stored in the metafield.
    ///
    /// Missing fields default to zero. `bulkPrice` may be a number or a
    /// numeric string.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::Malformed` for invalid JSON or wrong field types,
    /// and `PolicyError::NegativePrice` for a negative price.
    pub fn from_metafield_value(value: &str) -> Result<Self, PolicyError> {
        let policy: Self =
            serde_json::from_str(value).map_err(|e| PolicyError::Malformed(e.to_string()))?;
        policy.validated()
    }

    /// Encode as the metafield JSON value.
    #[must_use]
    pub fn to_metafield_value(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                r#"{{"bulkQuantity":{},"bulkPrice":"{}"}}"#,
                self.bulk_quantity, self.bulk_price
            )
        })
    }

    fn validated(self) -> Result<Self, PolicyError> {
        if self.bulk_price.is_sign_negative() && !self.bulk_price.is_zero() {
            return Err(PolicyError::NegativePrice(self.bulk_price));
        }
        Ok(self)
    }
}

impl fmt::Display for WholesalePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_enabled() {
            write!(f, "{} @ {}", self.bulk_quantity, self.bulk_price)
        } else {
            f.write_str("disabled")
        }
    }
}

/// Namespace and key of the policy metafield.
///
/// Stores set up by different versions of the tool use `wholesale.bulk` or
/// `wholesale.pricing`; the key is configurable, the namespace is not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetafieldKey {
    key: String,
}

impl MetafieldKey {
    /// Create a key inside the `wholesale` namespace.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Namespace (always `wholesale`).
    #[must_use]
    pub const fn namespace(&self) -> &'static str {
        METAFIELD_NAMESPACE
    }

    /// Key within the namespace.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether a metafield with the given coordinates holds the policy.
    #[must_use]
    pub fn matches(&self, namespace: &str, key: &str) -> bool {
        namespace == METAFIELD_NAMESPACE && key == self.key
    }
}

impl Default for MetafieldKey {
    fn default() -> Self {
        Self::new(DEFAULT_METAFIELD_KEY)
    }
}

impl fmt::Display for MetafieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", METAFIELD_NAMESPACE, self.key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let policy = WholesalePolicy::new(10, Decimal::new(4999, 2)).unwrap();
        assert_eq!(policy.bulk_quantity, 10);
        assert_eq!(policy.bulk_price, Decimal::new(4999, 2));
    }

    #[test]
    fn test_new_rejects_negative_quantity() {
        assert_eq!(
            WholesalePolicy::new(-3, Decimal::ONE),
            Err(PolicyError::NegativeQuantity(-3))
        );
    }

    #[test]
    fn test_new_rejects_huge_quantity() {
        let err = WholesalePolicy::new(i64::from(u32::MAX) + 1, Decimal::ONE).unwrap_err();
        assert!(matches!(err, PolicyError::QuantityTooLarge { .. }));
    }

    #[test]
    fn test_new_rejects_negative_price() {
        let err = WholesalePolicy::new(5, Decimal::new(-1, 0)).unwrap_err();
        assert_eq!(err, PolicyError::NegativePrice(Decimal::new(-1, 0)));
    }

    #[test]
    fn test_zero_quantity_is_disabled() {
        let policy = WholesalePolicy::new(0, Decimal::new(50, 0)).unwrap();
        assert!(!policy.is_enabled());
        assert!(!WholesalePolicy::DISABLED.is_enabled());
        assert_eq!(WholesalePolicy::default(), WholesalePolicy::DISABLED);
    }

    #[test]
    fn test_parse_number_price() {
        let policy =
            WholesalePolicy::from_metafield_value(r#"{"bulkQuantity": 12, "bulkPrice": 7.5}"#)
                .unwrap();
        assert_eq!(policy.bulk_quantity, 12);
        assert_eq!(policy.bulk_price, Decimal::new(75, 1));
    }

    #[test]
    fn test_parse_string_price() {
        let policy =
            WholesalePolicy::from_metafield_value(r#"{"bulkQuantity": 3, "bulkPrice": "19.90"}"#)
                .unwrap();
        assert_eq!(policy.bulk_price, Decimal::new(1990, 2));
    }

    #[test]
    fn test_parse_missing_fields_default_to_zero() {
        let policy = WholesalePolicy::from_metafield_value("{}").unwrap();
        assert_eq!(policy, WholesalePolicy::DISABLED);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            WholesalePolicy::from_metafield_value("not json"),
            Err(PolicyError::Malformed(_))
        ));
        assert!(matches!(
            WholesalePolicy::from_metafield_value(r#"{"bulkQuantity": -1}"#),
            Err(PolicyError::Malformed(_))
        ));
        assert!(matches!(
            WholesalePolicy::from_metafield_value(r#"{"bulkPrice": -2}"#),
            Err(PolicyError::NegativePrice(_))
        ));
    }

    #[test]
    fn test_metafield_value_shape() {
        let policy = WholesalePolicy::new(10, Decimal::new(1250, 2)).unwrap();
        assert_eq!(
            policy.to_metafield_value(),
            r#"{"bulkQuantity":10,"bulkPrice":12.5}"#
        );
    }

    #[test]
    fn test_metafield_key() {
        let key = MetafieldKey::default();
        assert_eq!(key.to_string(), "wholesale.bulk");
        assert!(key.matches("wholesale", "bulk"));
        assert!(!key.matches("wholesale", "pricing"));
        assert!(MetafieldKey::new("pricing").matches("wholesale", "pricing"));
    }

    #[test]
    fn test_display() {
        assert_eq!(WholesalePolicy::DISABLED.to_string(), "disabled");
        let policy = WholesalePolicy::new(10, Decimal::new(50, 0)).unwrap();
        assert_eq!(policy.to_string(), "10 @ 50");
    }
}
