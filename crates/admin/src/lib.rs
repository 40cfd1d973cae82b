//! Wholesale admin library.
//!
//! This crate provides the admin functionality as a library,
//! allowing it to be tested and reused by the CLI.
//!
//! # Security
//!
//! This crate holds a Shopify Admin API token with write access to product
//! metafields. Bind it to a private interface.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod i18n;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;
pub mod store;
