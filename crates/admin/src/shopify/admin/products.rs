//! Product and wholesale metafield operations for the Admin API.

use tracing::instrument;
use wholesale_core::{METAFIELD_NAMESPACE, MetafieldId, Product, ProductId, WholesalePolicy};

use super::{
    AdminClient, AdminShopifyError,
    conversions::{
        MetafieldNode, convert_currency, convert_metafield_id, convert_policy, convert_product,
        convert_user_errors,
    },
    queries::{GetProduct, GetProducts, MetafieldsSet, get_product, get_products, metafields_set},
};

/// Metafield type the policy is stored as.
const METAFIELD_TYPE: &str = "json";

/// A policy write the store has accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredPolicy {
    /// The metafield that now holds the policy.
    pub metafield_id: MetafieldId,
    /// The policy as stored.
    pub policy: WholesalePolicy,
}

impl AdminClient {
    /// Get the first `first` products with their wholesale policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_products(&self, first: i64) -> Result<Vec<Product>, AdminShopifyError> {
        let key = self.metafield_key();
        let variables = get_products::Variables {
            first,
            namespace: key.namespace().to_string(),
            key: key.key().to_string(),
        };

        let response = self.execute::<GetProducts>(variables).await?;
        let currency_code = convert_currency(&response.shop.currency_code);

        response
            .products
            .edges
            .into_iter()
            .map(|edge| convert_product(edge.node.into(), currency_code, key))
            .collect()
    }

    /// Get a product by ID.
    ///
    /// Returns `None` if the store has no such product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, AdminShopifyError> {
        let key = self.metafield_key();
        let variables = get_product::Variables {
            id: id.gid(),
            namespace: key.namespace().to_string(),
            key: key.key().to_string(),
        };

        let response = self.execute::<GetProduct>(variables).await?;
        let currency_code = convert_currency(&response.shop.currency_code);

        response
            .product
            .map(|product| convert_product(product.into(), currency_code, key))
            .transpose()
    }

    /// Create or replace the wholesale policy metafield of a product.
    ///
    /// Exactly one mutation is sent; nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::UserErrors` if Shopify rejects the value,
    /// or another error if the request fails.
    #[instrument(skip(self), fields(product_id = %id, policy = %policy))]
    pub async fn set_wholesale_policy(
        &self,
        id: &ProductId,
        policy: &WholesalePolicy,
    ) -> Result<StoredPolicy, AdminShopifyError> {
        let key = self.metafield_key();
        let variables = metafields_set::Variables {
            metafields: vec![metafields_set::MetafieldsSetInput {
                owner_id: id.gid(),
                namespace: Some(METAFIELD_NAMESPACE.to_string()),
                key: key.key().to_string(),
                type_: Some(METAFIELD_TYPE.to_string()),
                value: policy.to_metafield_value(),
                compare_digest: None,
            }],
        };

        let response = self.execute::<MetafieldsSet>(variables).await?;
        let payload = response.metafields_set.ok_or_else(|| {
            AdminShopifyError::InvalidResponse("metafieldsSet returned no payload".to_string())
        })?;

        if !payload.user_errors.is_empty() {
            return Err(AdminShopifyError::UserErrors(convert_user_errors(
                payload.user_errors,
            )));
        }

        let metafield = payload
            .metafields
            .unwrap_or_default()
            .into_iter()
            .map(MetafieldNode::from)
            .find(|m| key.matches(&m.namespace, &m.key))
            .ok_or_else(|| {
                AdminShopifyError::InvalidResponse(format!(
                    "metafieldsSet did not return {key}"
                ))
            })?;

        let metafield_id = convert_metafield_id(&metafield)?;
        let stored = convert_policy(&metafield, key).unwrap_or(*policy);
        tracing::info!(metafield_id = %metafield_id, "Wholesale policy saved");

        Ok(StoredPolicy {
            metafield_id,
            policy: stored,
        })
    }
}
