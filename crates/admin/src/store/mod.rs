//! The product metafield store the admin reads from and writes to.
//!
//! Handlers and services depend on [`ProductStore`] rather than on the
//! Shopify client, so the HTTP surface can run against an in-memory store in
//! tests (`MemoryStore`, behind the `test-support` feature).

#[cfg(any(test, feature = "test-support"))]
mod memory;

#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryStore;

use async_trait::async_trait;
use wholesale_core::{Product, ProductId, WholesalePolicy};

use crate::shopify::{AdminClient, AdminShopifyError, StoredPolicy};

/// Source of products and sink for wholesale policies.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// The first `first` products in store order.
    async fn list_products(&self, first: i64) -> Result<Vec<Product>, AdminShopifyError>;

    /// One product, or `None` if it does not exist.
    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, AdminShopifyError>;

    /// Persist the policy of a product, creating or replacing it.
    async fn write_policy(
        &self,
        id: &ProductId,
        policy: &WholesalePolicy,
    ) -> Result<StoredPolicy, AdminShopifyError>;
}

#[async_trait]
impl ProductStore for AdminClient {
    async fn list_products(&self, first: i64) -> Result<Vec<Product>, AdminShopifyError> {
        self.get_products(first).await
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, AdminShopifyError> {
        Self::get_product(self, id).await
    }

    async fn write_policy(
        &self,
        id: &ProductId,
        policy: &WholesalePolicy,
    ) -> Result<StoredPolicy, AdminShopifyError> {
        self.set_wholesale_policy(id, policy).await
    }
}
