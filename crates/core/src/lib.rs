//! Wholesale Core - Shared domain library.
//!
//! This crate provides the types and rules used across all wholesale tool
//! components:
//! - `admin` - Embedded admin panel and JSON API (Axum)
//! - `cli` - Command-line tools for quoting and managing policies
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Shopify ids, prices, products and the wholesale policy
//! - [`pricing`] - The wholesale price resolution rule and price quotes
//! - [`catalog`] - Explicit product list state with a single update path

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod pricing;
pub mod types;

pub use catalog::{Catalog, CatalogError};
pub use pricing::{PriceQuote, PriceTier, QuoteError, quote, resolve_price};
pub use types::*;
