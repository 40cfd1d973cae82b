//! Wholesale policy write path.
//!
//! A submission is validated, checked against the store, written once, and
//! only then recorded in the operator's catalog:
//! 1. Parse the product id, bulk quantity and bulk price
//! 2. Confirm the product exists
//! 3. Write the policy metafield
//! 4. Patch the catalog with the policy the store accepted

use rust_decimal::Decimal;
use tracing::{debug, info, instrument};
use wholesale_core::types::decimal_number;
use wholesale_core::{ProductId, RawId, WholesalePolicy};

use crate::error::{AppError, PRODUCT_NOT_FOUND};
use crate::state::AppState;

/// A validated policy submission for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyUpdate {
    /// Product the policy belongs to.
    pub product_id: ProductId,
    /// The policy to store.
    pub policy: WholesalePolicy,
}

impl PolicyUpdate {
    /// Validate typed input.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the id is not a product id or the
    /// policy values are out of range.
    pub fn new(product_id: RawId, bulk_quantity: i64, bulk_price: Decimal) -> Result<Self, AppError> {
        let product_id = ProductId::try_from(product_id)
            .map_err(|e| AppError::BadRequest(format!("Invalid productId: {e}")))?;
        let policy = WholesalePolicy::new(bulk_quantity, bulk_price)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(Self { product_id, policy })
    }

    /// Validate the raw strings of an HTML form row.
    ///
    /// Empty quantity or price fields count as zero.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if a field is not a number or is out of
    /// range.
    pub fn from_form(product_id: &str, bulk_quantity: &str, bulk_price: &str) -> Result<Self, AppError> {
        let bulk_quantity = match bulk_quantity.trim() {
            "" => 0,
            raw => raw
                .parse::<i64>()
                .map_err(|_| AppError::BadRequest(format!("Invalid bulkQuantity: '{raw}'")))?,
        };
        let bulk_price = match bulk_price.trim() {
            "" => Decimal::ZERO,
            raw => decimal_number::parse(raw)
                .map_err(|_| AppError::BadRequest(format!("Invalid bulkPrice: '{raw}'")))?,
        };

        Self::new(RawId::Text(product_id.trim().to_string()), bulk_quantity, bulk_price)
    }
}

/// Save a product's wholesale policy.
///
/// Sends exactly one write. The catalog is only touched after the store has
/// accepted the policy, so a failed write leaves it as it was.
///
/// # Errors
///
/// - `AppError::NotFound` if the product does not exist
/// - `AppError::Validation` with the store's first message if it rejects the value
/// - `AppError::Unauthorized` if there is no store session
/// - `AppError::Shopify` for other store failures
#[instrument(skip(state), fields(product_id = %update.product_id, policy = %update.policy))]
pub async fn save_policy(state: &AppState, update: PolicyUpdate) -> Result<WholesalePolicy, AppError> {
    let store = state.store();

    let product = store
        .get_product(&update.product_id)
        .await
        .map_err(|e| AppError::from(e).context("Failed to update product"))?
        .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.to_string()))?;

    let stored = store
        .write_policy(&product.id, &update.policy)
        .await
        .map_err(|e| AppError::from(e).context("Failed to update product"))?;

    if let Err(e) = state
        .catalog()
        .write()
        .await
        .apply_policy(&product.id, stored.policy)
    {
        debug!(error = %e, "Saved policy for a product outside the loaded list");
    }

    info!(metafield_id = %stored.metafield_id, "Wholesale policy updated");
    Ok(stored.policy)
}
