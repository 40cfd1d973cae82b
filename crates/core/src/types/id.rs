//! Newtype IDs for Shopify global object references.
//!
//! Shopify identifies every object with a global id of the form
//! `gid://shopify/<Kind>/<number>`. Operators and older API payloads often use
//! the bare number instead, so every id type here accepts both forms and
//! always renders the full global id.
//!
//! Use the `define_gid!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different object kinds.

use serde::Deserialize;

/// Prefix shared by every Shopify global id.
pub const GID_PREFIX: &str = "gid://shopify/";

/// Errors that can occur when parsing a Shopify id.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input string is empty.
    #[error("id cannot be empty")]
    Empty,
    /// The input is a global id for a different object kind.
    #[error("expected a {expected} id, got {found}")]
    WrongKind {
        /// Kind the caller asked for.
        expected: &'static str,
        /// The rejected input.
        found: String,
    },
    /// The numeric part is missing, zero, or not a number.
    #[error("invalid id: {0}")]
    Invalid(String),
}

/// Untyped id as it arrives over the wire: a JSON number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// Bare numeric id (`123`).
    Numeric(u64),
    /// Numeric string or global id (`"123"`, `"gid://shopify/Product/123"`).
    Text(String),
}

/// Parse the numeric tail of a Shopify id of the given kind.
///
/// # Errors
///
/// Returns `IdError` if the input is empty, belongs to another kind, or does
/// not end in a positive integer.
pub fn parse_legacy_id(input: &str, kind: &'static str) -> Result<u64, IdError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(IdError::Empty);
    }

    let tail = match input.strip_prefix(GID_PREFIX) {
        Some(rest) => match rest.split_once('/') {
            Some((found_kind, tail)) if found_kind == kind => tail,
            _ => {
                return Err(IdError::WrongKind {
                    expected: kind,
                    found: input.to_string(),
                });
            }
        },
        None => input,
    };

    // Global ids may carry query parameters (e.g. `?inventory_item_id=`)
    let tail = tail.split('?').next().unwrap_or_default();

    match tail.parse::<u64>() {
        Ok(0) | Err(_) => Err(IdError::Invalid(input.to_string())),
        Ok(id) => Ok(id),
    }
}

/// Macro to define a type-safe Shopify id wrapper.
///
/// Creates a newtype wrapper around the numeric (legacy) id with:
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `Serialize` as the full global id string
/// - `Deserialize` from a JSON number, numeric string, or global id
/// - `parse()`, `new()`, `legacy_id()` and `gid()`
/// - `Display` as the global id
///
/// # Example
///
/// ```rust
/// # use wholesale_core::define_gid;
/// define_gid!(CollectionId, "Collection");
///
/// let id = CollectionId::parse("42").unwrap();
/// assert_eq!(id.to_string(), "gid://shopify/Collection/42");
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident, $kind:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            /// Shopify object kind used in the global id.
            pub const KIND: &'static str = $kind;

            /// Create an id from its numeric form.
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Parse a bare numeric id or a global id.
            ///
            /// # Errors
            ///
            /// Returns `IdError` if the input is not an id of this kind.
            pub fn parse(input: &str) -> Result<Self, $crate::types::id::IdError> {
                $crate::types::id::parse_legacy_id(input, $kind).map(Self)
            }

            /// Get the numeric (legacy) id.
            #[must_use]
            pub const fn legacy_id(&self) -> u64 {
                self.0
            }

            /// Get the full global id, e.g. `gid://shopify/Product/123`.
            #[must_use]
            pub fn gid(&self) -> String {
                format!("{}{}/{}", $crate::types::id::GID_PREFIX, $kind, self.0)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}{}/{}", $crate::types::id::GID_PREFIX, $kind, self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<$crate::types::id::RawId> for $name {
            type Error = $crate::types::id::IdError;

            fn try_from(raw: $crate::types::id::RawId) -> Result<Self, Self::Error> {
                match raw {
                    $crate::types::id::RawId::Numeric(0) => {
                        Err($crate::types::id::IdError::Invalid("0".to_string()))
                    }
                    $crate::types::id::RawId::Numeric(id) => Ok(Self(id)),
                    $crate::types::id::RawId::Text(text) => Self::parse(&text),
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <$crate::types::id::RawId as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::try_from(raw).map_err(::serde::de::Error::custom)
            }
        }
    };
}

define_gid!(ProductId, "Product");
define_gid!(VariantId, "ProductVariant");
define_gid!(MetafieldId, "Metafield");
