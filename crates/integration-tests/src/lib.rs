//! Integration tests for the wholesale admin.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process tests against an in-memory store
//! cargo test -p wholesale-integration-tests
//!
//! # Live tests against a running admin server
//! ADMIN_BASE_URL=http://localhost:3000 cargo test -p wholesale-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `products_api` - JSON API and operator pages over the full router

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::Router;
use rust_decimal::Decimal;
use wholesale_admin::{
    config::{AdminConfig, ShopifyAdminConfig},
    i18n::Locale,
    routes,
    state::AppState,
    store::MemoryStore,
};
use wholesale_core::{CurrencyCode, Product, ProductId, Variant, VariantId, WholesalePolicy};

/// Router and store shared by one test.
pub struct TestContext {
    pub app: Router,
    pub store: Arc<MemoryStore>,
}

impl TestContext {
    /// Build the full application over an in-memory store seeded with
    /// `products`.
    #[must_use]
    pub fn new(products: Vec<Product>, locale: Locale) -> Self {
        let store = Arc::new(MemoryStore::new(products));
        let mut config = AdminConfig::new(ShopifyAdminConfig::new("integration.myshopify.com"));
        config.locale = locale;
        let app = routes::app(AppState::new(config, store.clone()));
        Self { app, store }
    }
}

/// A single-variant product priced in `currency`.
#[must_use]
pub fn product(
    id: u64,
    title: &str,
    price: Decimal,
    currency: CurrencyCode,
    policy: Option<WholesalePolicy>,
) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        variants: vec![Variant {
            id: VariantId::new(id * 100),
            price,
        }],
        currency_code: currency,
        policy,
    }
}

/// Base URL for live tests (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}
