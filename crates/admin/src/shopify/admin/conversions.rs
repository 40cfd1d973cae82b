//! Type conversions from GraphQL response types to domain types.
//!
//! `GetProducts` and `GetProduct` select the same product fields, but
//! `graphql_client` generates a separate type per operation. Both are first
//! mapped onto [`ProductNode`] so the domain conversion exists once.

use rust_decimal::Decimal;
use serde::Serialize;
use wholesale_core::types::decimal_number;
use wholesale_core::{
    CurrencyCode, MetafieldId, MetafieldKey, Product, ProductId, Variant, VariantId,
    WholesalePolicy,
};

use super::queries::{get_product, get_products, metafields_set};
use crate::shopify::{AdminShopifyError, UserError};

// =============================================================================
// Shared product fields
// =============================================================================

/// Product fields selected by the product queries.
#[derive(Debug, Clone)]
pub struct ProductNode {
    pub id: String,
    pub title: String,
    pub variants: Vec<VariantNode>,
    pub metafield: Option<MetafieldNode>,
}

/// `price` is the `Money` scalar, a decimal string.
#[derive(Debug, Clone)]
pub struct VariantNode {
    pub id: String,
    pub price: String,
}

#[derive(Debug, Clone)]
pub struct MetafieldNode {
    pub id: String,
    pub namespace: String,
    pub key: String,
    pub value: String,
}

impl From<get_products::GetProductsProductsEdgesNode> for ProductNode {
    fn from(node: get_products::GetProductsProductsEdgesNode) -> Self {
        Self {
            id: node.id,
            title: node.title,
            variants: node
                .variants
                .edges
                .into_iter()
                .map(|e| VariantNode {
                    id: e.node.id,
                    price: e.node.price,
                })
                .collect(),
            metafield: node.metafield.map(|m| MetafieldNode {
                id: m.id,
                namespace: m.namespace,
                key: m.key,
                value: m.value,
            }),
        }
    }
}

impl From<get_product::GetProductProduct> for ProductNode {
    fn from(product: get_product::GetProductProduct) -> Self {
        Self {
            id: product.id,
            title: product.title,
            variants: product
                .variants
                .edges
                .into_iter()
                .map(|e| VariantNode {
                    id: e.node.id,
                    price: e.node.price,
                })
                .collect(),
            metafield: product.metafield.map(|m| MetafieldNode {
                id: m.id,
                namespace: m.namespace,
                key: m.key,
                value: m.value,
            }),
        }
    }
}

impl From<metafields_set::MetafieldsSetMetafieldsSetMetafields> for MetafieldNode {
    fn from(m: metafields_set::MetafieldsSetMetafieldsSetMetafields) -> Self {
        Self {
            id: m.id,
            namespace: m.namespace,
            key: m.key,
            value: m.value,
        }
    }
}

// =============================================================================
// Domain conversions
// =============================================================================

/// Resolve the shop currency from a generated `CurrencyCode` enum.
///
/// Codes without a display symbol are kept by their ISO code. Only a value
/// that is not a currency code at all falls back to the default.
pub fn convert_currency<T: Serialize>(code: &T) -> CurrencyCode {
    let raw = match serde_json::to_value(code) {
        Ok(serde_json::Value::String(raw)) => raw,
        _ => String::new(),
    };

    CurrencyCode::from_code(&raw).unwrap_or_else(|| {
        tracing::warn!(
            currency_code = %raw,
            "Unrecognized shop currency, displaying as default"
        );
        CurrencyCode::default()
    })
}

/// Convert a product node into a domain product.
///
/// An id or variant price that does not parse is an invalid response. A
/// policy metafield that does not parse is logged and treated as absent.
pub fn convert_product(
    product: ProductNode,
    currency_code: CurrencyCode,
    key: &MetafieldKey,
) -> Result<Product, AdminShopifyError> {
    let variants = product
        .variants
        .into_iter()
        .map(|node| {
            Ok(Variant {
                id: VariantId::parse(&node.id).map_err(|e| invalid_id(&node.id, &e))?,
                price: parse_money(&node.price)?,
            })
        })
        .collect::<Result<Vec<_>, AdminShopifyError>>()?;

    let policy = product
        .metafield
        .as_ref()
        .and_then(|metafield| convert_policy(metafield, key));

    Ok(Product {
        id: ProductId::parse(&product.id).map_err(|e| invalid_id(&product.id, &e))?,
        title: product.title,
        variants,
        currency_code,
        policy,
    })
}

/// Parse the id of a returned metafield.
pub fn convert_metafield_id(metafield: &MetafieldNode) -> Result<MetafieldId, AdminShopifyError> {
    MetafieldId::parse(&metafield.id).map_err(|e| invalid_id(&metafield.id, &e))
}

/// Parse the policy held by a metafield, if it is the policy metafield and
/// its value is well formed.
pub fn convert_policy(metafield: &MetafieldNode, key: &MetafieldKey) -> Option<WholesalePolicy> {
    if !key.matches(&metafield.namespace, &metafield.key) {
        tracing::warn!(
            metafield_id = %metafield.id,
            namespace = %metafield.namespace,
            key = %metafield.key,
            "Ignoring metafield outside the configured policy key"
        );
        return None;
    }

    match WholesalePolicy::from_metafield_value(&metafield.value) {
        Ok(policy) => Some(policy),
        Err(e) => {
            tracing::warn!(
                metafield_id = %metafield.id,
                error = %e,
                "Malformed wholesale metafield, treating product as having no policy"
            );
            None
        }
    }
}

/// Convert mutation user errors.
pub fn convert_user_errors(
    errors: Vec<metafields_set::MetafieldsSetMetafieldsSetUserErrors>,
) -> Vec<UserError> {
    errors
        .into_iter()
        .map(|e| UserError {
            field: e.field.unwrap_or_default(),
            message: e.message,
        })
        .collect()
}

fn parse_money(amount: &str) -> Result<Decimal, AdminShopifyError> {
    decimal_number::parse(amount)
        .map_err(|e| AdminShopifyError::InvalidResponse(format!("price '{amount}': {e}")))
}

fn invalid_id(raw: &str, err: &impl std::fmt::Display) -> AdminShopifyError {
    AdminShopifyError::InvalidResponse(format!("id '{raw}': {err}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product_node(metafield: serde_json::Value, price: &str) -> ProductNode {
        let node: get_products::GetProductsProductsEdgesNode =
            serde_json::from_value(serde_json::json!({
                "id": "gid://shopify/Product/42",
                "title": "Cardamom 500g",
                "variants": {"edges": [
                    {"node": {"id": "gid://shopify/ProductVariant/420", "price": price}},
                    {"node": {"id": "gid://shopify/ProductVariant/421", "price": "99.00"}}
                ]},
                "metafield": metafield,
            }))
            .unwrap();
        node.into()
    }

    fn metafield(key: &str, value: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "gid://shopify/Metafield/9",
            "namespace": "wholesale",
            "key": key,
            "value": value,
        })
    }

    #[test]
    fn test_convert_product_with_policy() {
        let node = product_node(
            metafield("bulk", r#"{"bulkQuantity":10,"bulkPrice":"45.5"}"#),
            "50.00",
        );
        let product = convert_product(node, CurrencyCode::SAR, &MetafieldKey::default()).unwrap();

        assert_eq!(product.id, ProductId::new(42));
        assert_eq!(product.variants.len(), 2);
        assert_eq!(product.regular_price(), Some(Decimal::new(5000, 2)));
        assert_eq!(product.currency_code, CurrencyCode::SAR);
        let policy = product.policy.unwrap();
        assert_eq!(policy.bulk_quantity, 10);
        assert_eq!(policy.bulk_price, Decimal::new(455, 1));
    }

    #[test]
    fn test_convert_single_product_query() {
        let product: get_product::GetProductProduct = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Product/7",
            "title": "Dates 1kg",
            "variants": {"edges": [
                {"node": {"id": "gid://shopify/ProductVariant/70", "price": "40.00"}}
            ]},
            "metafield": metafield("bulk", r#"{"bulkQuantity":10,"bulkPrice":32}"#),
        }))
        .unwrap();

        let product =
            convert_product(product.into(), CurrencyCode::USD, &MetafieldKey::default()).unwrap();
        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.policy, WholesalePolicy::new(10, Decimal::from(32)).ok());
    }

    #[test]
    fn test_convert_product_without_metafield() {
        let node = product_node(serde_json::Value::Null, "12");
        let product = convert_product(node, CurrencyCode::USD, &MetafieldKey::default()).unwrap();
        assert!(product.policy.is_none());
    }

    #[test]
    fn test_malformed_metafield_is_no_policy() {
        let node = product_node(metafield("bulk", "{not json"), "12");
        let product = convert_product(node, CurrencyCode::USD, &MetafieldKey::default()).unwrap();
        assert!(product.policy.is_none());
        assert_eq!(product.effective_policy(), WholesalePolicy::DISABLED);
    }

    #[test]
    fn test_other_key_is_ignored() {
        let node = product_node(
            metafield("pricing", r#"{"bulkQuantity":3,"bulkPrice":1}"#),
            "12",
        );
        let meta = node.metafield.unwrap();
        assert_eq!(convert_metafield_id(&meta).unwrap(), MetafieldId::new(9));
        assert!(convert_policy(&meta, &MetafieldKey::default()).is_none());
        assert!(convert_policy(&meta, &MetafieldKey::new("pricing")).is_some());
    }

    #[test]
    fn test_invalid_price_is_rejected() {
        let node = product_node(serde_json::Value::Null, "free");
        let err = convert_product(node, CurrencyCode::USD, &MetafieldKey::default()).unwrap_err();
        assert!(matches!(err, AdminShopifyError::InvalidResponse(_)));
    }

    #[test]
    fn test_invalid_id_is_rejected() {
        let mut node = product_node(serde_json::Value::Null, "12");
        node.id = "gid://shopify/Collection/42".to_string();
        let err = convert_product(node, CurrencyCode::USD, &MetafieldKey::default()).unwrap_err();
        assert!(matches!(err, AdminShopifyError::InvalidResponse(_)));
    }

    #[test]
    fn test_convert_currency() {
        assert_eq!(
            convert_currency(&get_products::CurrencyCode::AED),
            CurrencyCode::AED
        );
        assert_eq!(
            convert_currency(&get_products::CurrencyCode::JPY),
            CurrencyCode::Other(*b"JPY")
        );
        assert_eq!(
            convert_currency(&get_product::CurrencyCode::Other("XAF".to_string())),
            CurrencyCode::Other(*b"XAF")
        );
        assert_eq!(
            convert_currency(&get_product::CurrencyCode::Other("not money".to_string())),
            CurrencyCode::USD
        );
    }

    #[test]
    fn test_unsupported_currency_is_shown_by_code() {
        let node = product_node(serde_json::Value::Null, "1500");
        let currency = convert_currency(&get_products::CurrencyCode::EGP);
        let product = convert_product(node, currency, &MetafieldKey::default()).unwrap();
        assert_eq!(product.display_price().unwrap().display(), "1500.00 EGP");
    }
}
