//! Wholesale price resolution.
//!
//! The whole pricing rule is one comparison: a product with an enabled policy
//! is sold at its bulk price once the requested quantity reaches the
//! threshold, otherwise at its regular price. The result is always one of the
//! two prices, never a blend.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Product, WholesalePolicy};

/// Which of the two prices a quote used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    /// Regular variant price.
    Regular,
    /// Wholesale bulk price.
    Bulk,
}

/// Determine the unit price to charge for `requested_quantity` units.
///
/// A `bulk_quantity` of zero disables the policy, so a zero threshold never
/// matches every request.
///
/// ```
/// use rust_decimal::Decimal;
/// use wholesale_core::{WholesalePolicy, resolve_price};
///
/// let policy = WholesalePolicy::new(10, Decimal::new(50, 0)).unwrap();
/// assert_eq!(resolve_price(Decimal::new(100, 0), &policy, 10), Decimal::new(50, 0));
/// assert_eq!(resolve_price(Decimal::new(100, 0), &policy, 9), Decimal::new(100, 0));
/// ```
#[must_use]
pub fn resolve_price(
    regular_price: Decimal,
    policy: &WholesalePolicy,
    requested_quantity: i64,
) -> Decimal {
    match tier_for(policy, requested_quantity) {
        PriceTier::Bulk => policy.bulk_price,
        PriceTier::Regular => regular_price,
    }
}

fn tier_for(policy: &WholesalePolicy, requested_quantity: i64) -> PriceTier {
    if policy.is_enabled() && requested_quantity >= i64::from(policy.bulk_quantity) {
        PriceTier::Bulk
    } else {
        PriceTier::Regular
    }
}

/// Errors from quoting a product.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteError {
    /// The product has no variant to take a regular price from.
    #[error("Product has no price")]
    NoPrice,
    /// The total does not fit in a `Decimal`.
    #[error("Quantity {0} is too large to price")]
    Overflow(i64),
}

/// A priced request for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Requested quantity, as given.
    pub quantity: i64,
    /// Regular unit price of the product.
    pub regular_price: Decimal,
    /// Unit price after applying the policy.
    pub unit_price: Decimal,
    /// `unit_price * quantity`, zero for non-positive quantities.
    pub total: Decimal,
    /// Which price applied.
    pub tier: PriceTier,
    /// The policy the quote was computed with.
    pub policy: WholesalePolicy,
}

impl PriceQuote {
    /// Price `requested_quantity` units at `regular_price` under `policy`.
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::Overflow` if the total does not fit in a `Decimal`.
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use wholesale_core::{PriceQuote, PriceTier, WholesalePolicy};
    ///
    /// let policy = WholesalePolicy::new(10, Decimal::new(32, 0)).unwrap();
    /// let q = PriceQuote::for_price(Decimal::new(40, 0), &policy, 12).unwrap();
    /// assert_eq!(q.tier, PriceTier::Bulk);
    /// assert_eq!(q.total, Decimal::new(384, 0));
    /// ```
    pub fn for_price(
        regular_price: Decimal,
        policy: &WholesalePolicy,
        requested_quantity: i64,
    ) -> Result<Self, QuoteError> {
        let tier = tier_for(policy, requested_quantity);
        let unit_price = resolve_price(regular_price, policy, requested_quantity);
        let total = if requested_quantity > 0 {
            unit_price
                .checked_mul(Decimal::from(requested_quantity))
                .ok_or(QuoteError::Overflow(requested_quantity))?
        } else {
            Decimal::ZERO
        };

        Ok(Self {
            quantity: requested_quantity,
            regular_price,
            unit_price,
            total,
            tier,
            policy: *policy,
        })
    }

    /// Savings against paying the regular price for the same quantity.
    ///
    /// `None` if the regular total itself does not fit in a `Decimal`.
    #[must_use]
    pub fn savings(&self) -> Option<Decimal> {
        if self.quantity <= 0 {
            return Some(Decimal::ZERO);
        }
        self.regular_price
            .checked_sub(self.unit_price)?
            .checked_mul(Decimal::from(self.quantity))
    }
}

/// Quote `requested_quantity` units of `product`.
///
/// # Errors
///
/// Returns `QuoteError::NoPrice` when the product has no variant to take a
/// regular price from, and `QuoteError::Overflow` when the total is too
/// large.
pub fn quote(product: &Product, requested_quantity: i64) -> Result<PriceQuote, QuoteError> {
    let regular_price = product.regular_price().ok_or(QuoteError::NoPrice)?;
    PriceQuote::for_price(
        regular_price,
        &product.effective_policy(),
        requested_quantity,
    )
}
