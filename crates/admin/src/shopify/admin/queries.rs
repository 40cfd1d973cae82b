//! GraphQL query definitions for Shopify Admin API.
//!
//! Uses `graphql_client` to generate type-safe Rust code from GraphQL queries.

use graphql_client::GraphQLQuery;

// =============================================================================
// Custom scalar type aliases (used by graphql_client)
// =============================================================================

/// Money amount as decimal string.
type Money = String;

// =============================================================================
// Product queries
// =============================================================================

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/admin/schema.graphql",
    query_path = "graphql/admin/queries/products.graphql",
    response_derives = "Debug, Clone"
)]
pub struct GetProducts;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/admin/schema.graphql",
    query_path = "graphql/admin/queries/products.graphql",
    response_derives = "Debug, Clone"
)]
pub struct GetProduct;

// =============================================================================
// Metafield mutations
// =============================================================================

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/admin/schema.graphql",
    query_path = "graphql/admin/queries/metafields.graphql",
    response_derives = "Debug, Clone"
)]
pub struct MetafieldsSet;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_product_queries_select_policy_metafield() {
        for query in [get_products::QUERY, get_product::QUERY] {
            assert!(query.contains("metafield(namespace: $namespace, key: $key)"));
            assert!(query.contains("currencyCode"));
        }
    }

    #[test]
    fn test_metafields_set_body() {
        let body = MetafieldsSet::build_query(metafields_set::Variables {
            metafields: vec![metafields_set::MetafieldsSetInput {
                owner_id: "gid://shopify/Product/1".to_string(),
                namespace: Some("wholesale".to_string()),
                key: "bulk".to_string(),
                type_: Some("json".to_string()),
                value: r#"{"bulkQuantity":10,"bulkPrice":50}"#.to_string(),
                compare_digest: None,
            }],
        });

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["operationName"], "MetafieldsSet");
        let input = &json["variables"]["metafields"][0];
        assert_eq!(input["ownerId"], "gid://shopify/Product/1");
        assert_eq!(input["type"], "json");
        assert_eq!(input["value"], r#"{"bulkQuantity":10,"bulkPrice":50}"#);
    }

    #[test]
    fn test_get_products_response_deserializes() {
        let data: get_products::ResponseData = serde_json::from_str(
            r#"{
                "shop": {"currencyCode": "SAR"},
                "products": {"edges": [{"node": {
                    "id": "gid://shopify/Product/101",
                    "title": "Dates",
                    "variants": {"edges": [{"node": {"id": "gid://shopify/ProductVariant/7", "price": "25.00"}}]},
                    "metafield": null
                }}]}
            }"#,
        )
        .unwrap();

        assert!(matches!(
            data.shop.currency_code,
            get_products::CurrencyCode::SAR
        ));
        let node = &data.products.edges[0].node;
        assert_eq!(node.id, "gid://shopify/Product/101");
        assert_eq!(node.variants.edges[0].node.price, "25.00");
        assert!(node.metafield.is_none());
    }

    #[test]
    fn test_unlisted_currency_deserializes_as_other() {
        let data: get_product::ResponseData =
            serde_json::from_str(r#"{"shop": {"currencyCode": "XAF"}, "product": null}"#).unwrap();

        assert!(matches!(
            data.shop.currency_code,
            get_product::CurrencyCode::Other(ref code) if code == "XAF"
        ));
        assert!(data.product.is_none());
    }
}
