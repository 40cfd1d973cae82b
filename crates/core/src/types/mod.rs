//! Core types for the wholesale tool.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod decimal_number;
pub mod id;
pub mod policy;
pub mod price;
pub mod product;

pub use id::*;
pub use policy::{METAFIELD_NAMESPACE, MetafieldKey, PolicyError, WholesalePolicy};
pub use price::{CurrencyCode, Price};
pub use product::{Product, Variant};
