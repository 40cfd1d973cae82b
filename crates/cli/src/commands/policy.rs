//! Wholesale policy commands against the live store.
//!
//! # Environment Variables
//!
//! - `SHOPIFY_SHOP` - Store domain (e.g. `example.myshopify.com`)
//! - `SHOPIFY_ACCESS_TOKEN` - Admin API access token
//! - `WHOLESALE_METAFIELD_KEY` - Metafield key under `wholesale` (default `bulk`)

use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use wholesale_admin::{
    config::{AdminConfig, ConfigError},
    error::AppError,
    services::{PolicyUpdate, save_policy},
    shopify::AdminClient,
    state::AppState,
};
use wholesale_core::{Product, RawId};

/// Errors that can occur during policy commands.
#[derive(Debug, Error)]
pub enum PolicyCommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The store or the submitted values rejected the request.
    #[error("{0}")]
    App(#[from] AppError),
}

fn connect() -> Result<AppState, PolicyCommandError> {
    let config = AdminConfig::from_env()?;
    let client = AdminClient::new(&config.shopify);
    tracing::info!("Connecting to {} ({})", client.store(), client.metafield_key());
    Ok(AppState::new(config, Arc::new(client)))
}

/// Format one product for the listing.
fn describe(product: &Product) -> String {
    let price = product
        .display_price()
        .map_or_else(|| "-".to_string(), |p| p.display());
    let policy = product
        .policy
        .map_or_else(|| "none".to_string(), |p| p.to_string());
    format!(
        "{} {} | {} | wholesale: {}",
        product.id.legacy_id(),
        product.title,
        price,
        policy
    )
}

/// List products with their wholesale policies.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the fetch fails.
pub async fn list(first: Option<i64>) -> Result<(), PolicyCommandError> {
    let state = connect()?;
    let first = first.unwrap_or_else(|| state.page_size());

    let products = state
        .store()
        .list_products(first)
        .await
        .map_err(|e| AppError::from(e).context("Failed to fetch products"))?;

    if products.is_empty() {
        tracing::info!("No products found");
    }
    for product in &products {
        tracing::info!("{}", describe(product));
    }
    Ok(())
}

/// Set a product's wholesale policy.
///
/// # Errors
///
/// Returns an error if the input is invalid, the product does not exist or
/// the store rejects the write.
pub async fn set(product: &str, quantity: i64, price: Decimal) -> Result<(), PolicyCommandError> {
    let update = PolicyUpdate::new(RawId::Text(product.trim().to_string()), quantity, price)?;
    let state = connect()?;

    let saved = save_policy(&state, update).await?;
    tracing::info!("Saved wholesale policy for {}: {}", update.product_id, saved);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wholesale_core::{CurrencyCode, ProductId, Variant, VariantId, WholesalePolicy};

    use super::*;

    #[test]
    fn test_describe() {
        let mut product = Product {
            id: ProductId::new(12),
            title: "Green tea".to_string(),
            variants: vec![Variant {
                id: VariantId::new(120),
                price: Decimal::new(1250, 2),
            }],
            currency_code: CurrencyCode::USD,
            policy: None,
        };
        assert_eq!(describe(&product), "12 Green tea | $12.50 | wholesale: none");

        product.policy = WholesalePolicy::new(10, Decimal::from(9)).ok();
        assert_eq!(describe(&product), "12 Green tea | $12.50 | wholesale: 10 @ 9");
    }

    #[tokio::test]
    async fn test_set_rejects_invalid_input_before_connecting() {
        let err = set("gid://shopify/Order/1", 1, Decimal::ONE).await.unwrap_err();
        assert!(matches!(err, PolicyCommandError::App(AppError::BadRequest(_))));

        let err = set("12", -3, Decimal::ONE).await.unwrap_err();
        assert!(matches!(err, PolicyCommandError::App(AppError::BadRequest(_))));
    }
}
