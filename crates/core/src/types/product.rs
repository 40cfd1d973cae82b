//! Product and variant types as the wholesale tool sees them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ProductId, VariantId};
use super::policy::WholesalePolicy;
use super::price::{CurrencyCode, Price};

/// A purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant ID.
    pub id: VariantId,
    /// Regular unit price.
    pub price: Decimal,
}

/// A product with its variants and wholesale policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Variants in store order. The first one carries the regular price.
    pub variants: Vec<Variant>,
    /// Shop currency the prices are expressed in.
    #[serde(default)]
    pub currency_code: CurrencyCode,
    /// Configured policy, `None` when the metafield is absent.
    pub policy: Option<WholesalePolicy>,
}

impl Product {
    /// Regular unit price (first variant), if the product has any variant.
    #[must_use]
    pub fn regular_price(&self) -> Option<Decimal> {
        self.variants.first().map(|v| v.price)
    }

    /// Regular unit price with currency, for display.
    #[must_use]
    pub fn display_price(&self) -> Option<Price> {
        self.regular_price()
            .map(|amount| Price::new(amount, self.currency_code))
    }

    /// The configured policy, or a disabled one when none is set.
    #[must_use]
    pub fn effective_policy(&self) -> WholesalePolicy {
        self.policy.unwrap_or(WholesalePolicy::DISABLED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(variants: Vec<Variant>) -> Product {
        Product {
            id: ProductId::new(1),
            title: "Dates 1kg".to_string(),
            variants,
            currency_code: CurrencyCode::SAR,
            policy: None,
        }
    }

    #[test]
    fn test_regular_price_uses_first_variant() {
        let p = product(vec![
            Variant {
                id: VariantId::new(10),
                price: Decimal::new(2500, 2),
            },
            Variant {
                id: VariantId::new(11),
                price: Decimal::new(3000, 2),
            },
        ]);
        assert_eq!(p.regular_price(), Some(Decimal::new(2500, 2)));
        assert_eq!(
            p.display_price().map(|price| price.display()),
            Some("25.00 ر.س".to_string())
        );
    }

    #[test]
    fn test_no_variants_has_no_price() {
        let p = product(vec![]);
        assert_eq!(p.regular_price(), None);
        assert_eq!(p.display_price(), None);
    }

    #[test]
    fn test_effective_policy_defaults_to_disabled() {
        let mut p = product(vec![]);
        assert_eq!(p.effective_policy(), WholesalePolicy::DISABLED);

        let policy = WholesalePolicy::new(6, Decimal::new(20, 0)).ok();
        p.policy = policy;
        assert_eq!(p.effective_policy().bulk_quantity, 6);
    }
}
