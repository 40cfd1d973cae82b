//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Operator pages (HTML)
//! GET  /                       - Product table with wholesale policies
//! POST /                       - Save one row of the table
//! GET  /quote                  - Wholesale price calculator
//!
//! # JSON API
//! GET  /products               - List products with policies
//! POST /products               - Save a wholesale policy
//! GET  /products/{id}/quote    - Price a quantity of one product
//! ```

pub mod api;
pub mod products;
pub mod quote;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Banner shown above an operator page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// `success` or `error`, used as a CSS class.
    pub kind: &'static str,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub const fn success(message: String) -> Self {
        Self {
            kind: "success",
            message,
        }
    }

    #[must_use]
    pub const fn error(message: String) -> Self {
        Self {
            kind: "error",
            message,
        }
    }
}

/// Build all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(products::router())
        .merge(quote::router())
        .merge(api::router())
}

/// Build the complete application with state attached.
pub fn app(state: AppState) -> Router {
    routes().with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the store.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use rust_decimal::Decimal;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use wholesale_core::{CurrencyCode, Product, ProductId, Variant, VariantId, WholesalePolicy};

    use super::*;
    use crate::config::{AdminConfig, ShopifyAdminConfig};
    use crate::i18n::Locale;
    use crate::store::MemoryStore;

    fn product(id: u64, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            variants: vec![Variant {
                id: VariantId::new(id * 10),
                price: Decimal::from(price),
            }],
            currency_code: CurrencyCode::USD,
            policy: None,
        }
    }

    fn test_app(store: Arc<MemoryStore>, locale: Locale) -> Router {
        let mut config = AdminConfig::new(ShopifyAdminConfig::new("test.myshopify.com"));
        config.locale = locale;
        app(AppState::new(config, store))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_form(body: &str) -> Request<Body> {
        Request::post("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(Arc::new(MemoryStore::default()), Locale::En);
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_list_products_json() {
        let store = Arc::new(MemoryStore::new(vec![product(1, 100), product(2, 20)]));
        let app = test_app(store, Locale::En);

        let response = app
            .oneshot(Request::get("/products").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let products = body["products"].as_array().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0]["id"], "gid://shopify/Product/1");
        assert_eq!(products[0]["legacyId"], 1);
        assert_eq!(products[0]["currencyCode"], "USD");
        assert!(products[0]["wholesale"].is_null());
    }

    #[tokio::test]
    async fn test_update_policy_json() {
        let store = Arc::new(MemoryStore::new(vec![product(1, 100)]));
        let app = test_app(store.clone(), Locale::En);

        let response = app
            .oneshot(post_json(
                "/products",
                &json!({"productId": 1, "bulkQuantity": 10, "bulkPrice": 80.5}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"success": true}));

        let stored = store.product(&ProductId::new(1)).await.unwrap();
        assert_eq!(
            stored.policy,
            WholesalePolicy::new(10, Decimal::new(805, 1)).ok()
        );
    }

    #[tokio::test]
    async fn test_update_policy_errors() {
        let store = Arc::new(MemoryStore::new(vec![product(1, 100)]));
        let app = test_app(store.clone(), Locale::En);

        let response = app
            .clone()
            .oneshot(post_json(
                "/products",
                &json!({"productId": 99, "bulkQuantity": 10, "bulkPrice": 5}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({"error": "Product not found"}));

        let response = app
            .clone()
            .oneshot(post_json(
                "/products",
                &json!({"productId": 1, "bulkQuantity": -1, "bulkPrice": 5}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());

        let response = app
            .clone()
            .oneshot(post_json("/products", &json!({"productId": 1})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        store.revoke_session().await;
        let response = app
            .oneshot(post_json(
                "/products",
                &json!({"productId": 1, "bulkQuantity": 1, "bulkPrice": 5}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            json!({"error": "No active session found"})
        );
        assert_eq!(store.write_count().await, 0);
    }

    #[tokio::test]
    async fn test_quote_json() {
        let mut p = product(4, 100);
        p.policy = WholesalePolicy::new(10, Decimal::from(80)).ok();
        let app = test_app(Arc::new(MemoryStore::new(vec![p])), Locale::En);

        let response = app
            .clone()
            .oneshot(
                Request::get("/products/4/quote?quantity=10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["tier"], "bulk");
        assert_eq!(body["unitPrice"], "80");
        assert_eq!(body["total"], "800");

        let response = app
            .oneshot(
                Request::get("/products/5/quote?quantity=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_quote_json_total_too_large() {
        let mut p = product(6, 20_000_000_000);
        p.policy = WholesalePolicy::new(1, Decimal::from(10_000_000_000_i64)).ok();
        let app = test_app(Arc::new(MemoryStore::new(vec![p])), Locale::En);

        let response = app
            .oneshot(
                Request::get(format!("/products/6/quote?quantity={}", i64::MAX))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": format!("Quantity {} is too large to price", i64::MAX)})
        );
    }

    #[tokio::test]
    async fn test_product_page_renders_rows() {
        let store = Arc::new(MemoryStore::new(vec![product(1, 100)]));
        let app = test_app(store, Locale::Ar);

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains(r#"dir="rtl""#));
        assert!(html.contains("Product 1"));
        assert!(html.contains(r#"id="policy-1""#));
        assert!(html.contains("$100.00"));
    }

    #[tokio::test]
    async fn test_product_page_fetch_error_is_localized() {
        let store = Arc::new(MemoryStore::new(vec![product(1, 100)]));
        store.revoke_session().await;
        let app = test_app(store, Locale::Ar);

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains("لا توجد جلسة نشطة"));
    }

    #[tokio::test]
    async fn test_product_form_submit() {
        let store = Arc::new(MemoryStore::new(vec![product(1, 100)]));
        let app = test_app(store.clone(), Locale::En);

        let response = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(post_form("product_id=1&bulk_quantity=6&bulk_price=75"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Product updated"));
        assert!(html.contains(r#"value="75""#));
        assert_eq!(store.write_count().await, 1);

        store.reject_writes(ProductId::new(1), "Value is invalid").await;
        let response = app
            .oneshot(post_form("product_id=1&bulk_quantity=7&bulk_price=70"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = body_text(response).await;
        assert!(html.contains("Failed to update product: Value is invalid"));
        // Catalog still shows the last accepted policy
        assert!(html.contains(r#"value="75""#));
    }

    #[tokio::test]
    async fn test_quote_page() {
        let mut p = product(3, 40);
        p.policy = WholesalePolicy::new(10, Decimal::from(32)).ok();
        let app = test_app(Arc::new(MemoryStore::new(vec![p])), Locale::En);

        let response = app
            .clone()
            .oneshot(
                Request::get("/quote?product=3&quantity=12")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("$32.00"));
        assert!(html.contains("$384.00"));

        let response = app
            .oneshot(
                Request::get("/quote?product=3&quantity=abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
