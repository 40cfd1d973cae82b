//! In-memory [`ProductStore`] for tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use wholesale_core::{MetafieldId, Product, ProductId, WholesalePolicy};

use super::ProductStore;
use crate::shopify::{AdminShopifyError, StoredPolicy, UserError};

/// In-process store holding products in memory.
///
/// Writes are validated the way the store validates JSON metafields, and a
/// product can be made to reject writes with [`MemoryStore::reject_writes`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    products: Vec<Product>,
    metafields: BTreeMap<ProductId, MetafieldId>,
    rejected: BTreeMap<ProductId, String>,
    requires_token: bool,
    writes: usize,
}

impl MemoryStore {
    /// Create a store seeded with `products`.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                products,
                ..MemoryState::default()
            }),
        }
    }

    /// Fail every call as if no access token were configured.
    pub async fn revoke_session(&self) {
        self.state.lock().await.requires_token = true;
    }

    /// Reject writes to `id` with a user error carrying `message`.
    pub async fn reject_writes(&self, id: ProductId, message: impl Into<String>) {
        self.state.lock().await.rejected.insert(id, message.into());
    }

    /// Number of accepted policy writes.
    pub async fn write_count(&self) -> usize {
        self.state.lock().await.writes
    }

    /// Current stored copy of a product.
    pub async fn product(&self, id: &ProductId) -> Option<Product> {
        self.state
            .lock()
            .await
            .products
            .iter()
            .find(|p| &p.id == id)
            .cloned()
    }
}

impl MemoryState {
    fn check_session(&self) -> Result<(), AdminShopifyError> {
        if self.requires_token {
            return Err(AdminShopifyError::NoAccessToken);
        }
        Ok(())
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list_products(&self, first: i64) -> Result<Vec<Product>, AdminShopifyError> {
        let state = self.state.lock().await;
        state.check_session()?;
        let take = usize::try_from(first.max(0)).unwrap_or(usize::MAX);
        Ok(state.products.iter().take(take).cloned().collect())
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, AdminShopifyError> {
        let state = self.state.lock().await;
        state.check_session()?;
        Ok(state.products.iter().find(|p| &p.id == id).cloned())
    }

    async fn write_policy(
        &self,
        id: &ProductId,
        policy: &WholesalePolicy,
    ) -> Result<StoredPolicy, AdminShopifyError> {
        let mut state = self.state.lock().await;
        state.check_session()?;

        if let Some(message) = state.rejected.get(id) {
            return Err(AdminShopifyError::UserErrors(vec![UserError {
                field: vec!["metafields".to_string(), "0".to_string(), "value".to_string()],
                message: message.clone(),
            }]));
        }

        let stored = WholesalePolicy::from_metafield_value(&policy.to_metafield_value())
            .map_err(|e| {
                AdminShopifyError::UserErrors(vec![UserError {
                    field: vec!["metafields".to_string(), "0".to_string(), "value".to_string()],
                    message: e.to_string(),
                }])
            })?;

        let Some(index) = state.products.iter().position(|p| &p.id == id) else {
            return Err(AdminShopifyError::UserErrors(vec![UserError {
                field: vec!["metafields".to_string(), "0".to_string(), "ownerId".to_string()],
                message: "Owner does not exist".to_string(),
            }]));
        };

        let next_id = MetafieldId::new(
            u64::try_from(state.metafields.len())
                .unwrap_or(u64::MAX)
                .saturating_add(1),
        );
        let metafield_id = *state.metafields.entry(*id).or_insert(next_id);

        if let Some(product) = state.products.get_mut(index) {
            product.policy = Some(stored);
        }
        state.writes += 1;

        Ok(StoredPolicy {
            metafield_id,
            policy: stored,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;
    use wholesale_core::{CurrencyCode, Variant, VariantId};

    use super::*;

    fn product(id: u64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            variants: vec![Variant {
                id: VariantId::new(id + 100),
                price: Decimal::from(20),
            }],
            currency_code: CurrencyCode::USD,
            policy: None,
        }
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new(vec![product(1), product(2)]);
        let policy = WholesalePolicy::new(4, Decimal::from(15)).unwrap();

        let stored = store.write_policy(&ProductId::new(2), &policy).await.unwrap();
        assert_eq!(stored.policy, policy);

        let again = store.write_policy(&ProductId::new(2), &policy).await.unwrap();
        assert_eq!(again.metafield_id, stored.metafield_id);

        let fetched = store.get_product(&ProductId::new(2)).await.unwrap().unwrap();
        assert_eq!(fetched.policy, Some(policy));
        assert_eq!(store.write_count().await, 2);
    }

    #[tokio::test]
    async fn test_memory_store_assigns_one_metafield_per_product() {
        let store = MemoryStore::new(vec![product(1), product(2)]);
        let policy = WholesalePolicy::new(4, Decimal::from(15)).unwrap();

        let first = store.write_policy(&ProductId::new(1), &policy).await.unwrap();
        let second = store.write_policy(&ProductId::new(2), &policy).await.unwrap();
        let first_again = store.write_policy(&ProductId::new(1), &policy).await.unwrap();

        assert_eq!(first.metafield_id, MetafieldId::new(1));
        assert_eq!(second.metafield_id, MetafieldId::new(2));
        assert_eq!(first_again.metafield_id, first.metafield_id);
    }

    #[tokio::test]
    async fn test_memory_store_list_respects_first() {
        let store = MemoryStore::new(vec![product(1), product(2), product(3)]);
        assert_eq!(store.list_products(2).await.unwrap().len(), 2);
        assert!(store.list_products(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_rejections() {
        let store = MemoryStore::new(vec![product(1)]);
        store.reject_writes(ProductId::new(1), "Value is too large").await;

        let err = store
            .write_policy(&ProductId::new(1), &WholesalePolicy::DISABLED)
            .await
            .unwrap_err();
        assert!(matches!(err, AdminShopifyError::UserErrors(ref e) if e[0].message == "Value is too large"));
        assert_eq!(store.write_count().await, 0);

        store.revoke_session().await;
        assert!(matches!(
            store.list_products(10).await,
            Err(AdminShopifyError::NoAccessToken)
        ));
    }
}
