//! Product and wholesale policy JSON handlers.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use wholesale_core::types::decimal_number;
use wholesale_core::{CurrencyCode, PriceQuote, Product, ProductId, RawId, WholesalePolicy, quote};

use crate::{
    error::{AppError, PRODUCT_NOT_FOUND},
    services::{PolicyUpdate, save_policy},
    state::AppState,
};

/// Build the products API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(update_policy))
        .route("/products/{id}/quote", get(quote_product))
}

/// Response for the product list.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
}

/// A product with its wholesale policy.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub legacy_id: u64,
    pub title: String,
    pub price: Option<Decimal>,
    pub currency_code: CurrencyCode,
    pub variants: Vec<VariantResponse>,
    pub wholesale: Option<WholesalePolicy>,
}

/// A variant and its regular price.
#[derive(Debug, Serialize)]
pub struct VariantResponse {
    pub id: String,
    pub price: Decimal,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            legacy_id: product.id.legacy_id(),
            title: product.title.clone(),
            price: product.regular_price(),
            currency_code: product.currency_code,
            variants: product
                .variants
                .iter()
                .map(|v| VariantResponse {
                    id: v.id.gid(),
                    price: v.price,
                })
                .collect(),
            wholesale: product.policy,
        }
    }
}

/// Request for saving a wholesale policy.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePolicyRequest {
    pub product_id: RawId,
    pub bulk_quantity: i64,
    #[serde(with = "decimal_number")]
    pub bulk_price: Decimal,
}

/// Response for a saved policy.
#[derive(Debug, Serialize)]
pub struct UpdatePolicyResponse {
    pub success: bool,
}

/// Quote query parameters.
#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub quantity: i64,
}

/// A priced request for one product.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub product_id: ProductId,
    pub title: String,
    pub currency_code: CurrencyCode,
    #[serde(flatten)]
    pub quote: PriceQuote,
}

/// List products with their wholesale policies.
///
/// Also refreshes the operator catalog with the fetched list.
///
/// # Errors
///
/// Returns 401 without a store session and 500 if the fetch fails.
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ProductListResponse>, AppError> {
    let products = state
        .store()
        .list_products(state.page_size())
        .await
        .map_err(|e| AppError::from(e).context("Failed to fetch products"))?;

    let response = ProductListResponse {
        products: products.iter().map(ProductResponse::from).collect(),
    };
    state.catalog().write().await.replace(products);

    Ok(Json(response))
}

/// Save a product's wholesale policy.
///
/// # Errors
///
/// Returns 400 for invalid input or a rejected value, 401 without a store
/// session, 404 for an unknown product and 500 if the write fails.
#[instrument(skip(state, payload))]
pub async fn update_policy(
    State(state): State<AppState>,
    payload: Result<Json<UpdatePolicyRequest>, JsonRejection>,
) -> Result<Json<UpdatePolicyResponse>, AppError> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let update = PolicyUpdate::new(body.product_id, body.bulk_quantity, body.bulk_price)?;

    save_policy(&state, update).await?;

    Ok(Json(UpdatePolicyResponse { success: true }))
}

/// Quote a quantity of one product at its current policy.
///
/// # Errors
///
/// Returns 400 for an invalid id or quantity, a product without a price, or a
/// total too large to represent, and 404 for an unknown product.
#[instrument(skip(state, query))]
pub async fn quote_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<QuoteQuery>, QueryRejection>,
) -> Result<Json<QuoteResponse>, AppError> {
    let product_id = ProductId::parse(&id)
        .map_err(|e| AppError::BadRequest(format!("Invalid product id: {e}")))?;
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let product = state
        .store()
        .get_product(&product_id)
        .await
        .map_err(|e| AppError::from(e).context("Failed to fetch products"))?
        .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.to_string()))?;

    let price_quote =
        quote(&product, query.quantity).map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(Json(QuoteResponse {
        product_id: product.id,
        title: product.title,
        currency_code: product.currency_code,
        quote: price_quote,
    }))
}
