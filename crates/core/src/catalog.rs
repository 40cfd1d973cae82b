//! Product list state shared by the admin pages.
//!
//! The catalog is the operator's local view of the store: it is replaced
//! wholesale by each list fetch and patched by confirmed policy writes. It is
//! never patched speculatively, so a failed write leaves it untouched.

use serde::Serialize;

use crate::pricing::{PriceQuote, QuoteError, quote};
use crate::types::{Product, ProductId, WholesalePolicy};

/// Errors from catalog updates.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The product is not part of the current list.
    #[error("product {0} is not in the catalog")]
    UnknownProduct(ProductId),
}

/// The operator's current product list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    products: Vec<Product>,
    loaded: bool,
}

impl Catalog {
    /// Create an empty, not yet loaded catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
            loaded: false,
        }
    }

    /// Create a catalog from a fetched product list.
    #[must_use]
    pub const fn from_products(products: Vec<Product>) -> Self {
        Self {
            products,
            loaded: true,
        }
    }

    /// Whether a list fetch has completed at least once.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Products in store order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Install a fresh list fetch, discarding the previous list.
    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
        self.loaded = true;
    }

    /// Record a policy the store has accepted.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownProduct` if the product is not listed.
    pub fn apply_policy(
        &mut self,
        id: &ProductId,
        policy: WholesalePolicy,
    ) -> Result<(), CatalogError> {
        let product = self
            .products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or(CatalogError::UnknownProduct(*id))?;
        product.policy = Some(policy);
        Ok(())
    }

    /// Quote a listed product.
    ///
    /// Returns `None` if the product is unknown.
    #[must_use]
    pub fn quote(
        &self,
        id: &ProductId,
        requested_quantity: i64,
    ) -> Option<Result<PriceQuote, QuoteError>> {
        self.get(id).map(|p| quote(p, requested_quantity))
    }
}
