//! Wholesale price calculator page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;
use wholesale_core::{Catalog, Price, PriceQuote, PriceTier, Product, ProductId};

use crate::{
    error::AppError,
    i18n::{Action, Locale, Texts, describe_error},
    state::AppState,
};

use super::Notice;

/// Build the calculator router.
pub fn router() -> Router<AppState> {
    Router::new().route("/quote", get(index))
}

/// Calculator query parameters.
///
/// Kept as raw strings so a half-filled form still renders.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteQuery {
    pub product: Option<String>,
    pub quantity: Option<String>,
}

/// A product in the selector.
#[derive(Debug, Clone)]
pub struct ProductOption {
    pub id: u64,
    pub title: String,
    pub selected: bool,
}

/// Calculated price for the selected product.
#[derive(Debug, Clone)]
pub struct QuoteView {
    pub title: String,
    pub quantity: i64,
    pub unit_price: String,
    pub total: String,
    pub regular_price: String,
    pub bulk_quantity: u32,
    pub bulk_price: String,
    pub is_bulk: bool,
    pub has_policy: bool,
    /// Saving against the regular price, when there is one.
    pub savings: Option<String>,
}

impl QuoteView {
    fn new(product: &Product, quote: &PriceQuote) -> Self {
        let currency = product.currency_code;
        let fmt = |amount| Price::new(amount, currency).display();

        Self {
            title: product.title.clone(),
            quantity: quote.quantity,
            unit_price: fmt(quote.unit_price),
            total: fmt(quote.total),
            regular_price: fmt(quote.regular_price),
            bulk_quantity: quote.policy.bulk_quantity,
            bulk_price: fmt(quote.policy.bulk_price),
            is_bulk: quote.tier == PriceTier::Bulk,
            has_policy: quote.policy.is_enabled(),
            savings: quote.savings().filter(|s| *s > Decimal::ZERO).map(fmt),
        }
    }
}

/// Calculator page template.
#[derive(Template, WebTemplate)]
#[template(path = "quote/index.html")]
pub struct QuoteTemplate {
    pub t: &'static Texts,
    pub locale: Locale,
    pub current_path: &'static str,
    pub products: Vec<ProductOption>,
    pub quantity: i64,
    pub quote: Option<QuoteView>,
    pub notice: Option<Notice>,
}

/// Parse the quantity field. Missing or blank means one unit.
fn parse_quantity(raw: Option<&str>) -> Result<i64, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(1),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Invalid quantity: '{raw}'"))),
    }
}

fn build(
    locale: Locale,
    catalog: &Catalog,
    selected: Option<ProductId>,
    quantity: i64,
    mut status: StatusCode,
    mut notice: Option<Notice>,
) -> (StatusCode, QuoteTemplate) {
    let t = locale.texts();
    let products = catalog
        .products()
        .iter()
        .map(|p| ProductOption {
            id: p.id.legacy_id(),
            title: p.title.clone(),
            selected: Some(p.id) == selected,
        })
        .collect();

    let quote = selected.and_then(|id| {
        let Some(product) = catalog.get(&id) else {
            notice.get_or_insert_with(|| Notice::error(t.product_not_found.to_string()));
            return None;
        };
        match catalog.quote(&id, quantity)? {
            Ok(q) => Some(QuoteView::new(product, &q)),
            Err(e) => {
                if notice.is_none() {
                    let err = AppError::BadRequest(e.to_string());
                    status = err.status();
                    notice = Some(Notice::error(describe_error(locale, &err, Action::Fetch)));
                }
                None
            }
        }
    });

    let page = QuoteTemplate {
        t,
        locale,
        current_path: "/quote",
        products,
        quantity,
        quote,
        notice,
    };
    (status, page)
}

/// Calculator handler.
///
/// Refreshes the product list, then prices the selected product at the
/// requested quantity.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> (StatusCode, QuoteTemplate) {
    let locale = state.locale();
    let mut status = StatusCode::OK;
    let mut notice = None;

    match state.store().list_products(state.page_size()).await {
        Ok(products) => state.catalog().write().await.replace(products),
        Err(e) => {
            let err = AppError::from(e).context("Failed to fetch products");
            err.report();
            status = err.status();
            notice = Some(Notice::error(describe_error(locale, &err, Action::Fetch)));
        }
    }

    let selected = match query.product.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => ProductId::parse(raw)
            .map(Some)
            .map_err(|e| AppError::BadRequest(format!("Invalid product id: {e}"))),
    };
    let input = selected.and_then(|id| Ok((id, parse_quantity(query.quantity.as_deref())?)));

    let (selected, quantity) = match input {
        Ok(input) => input,
        Err(err) => {
            if notice.is_none() {
                status = err.status();
                notice = Some(Notice::error(describe_error(locale, &err, Action::Fetch)));
            }
            (None, 1)
        }
    };

    let catalog = state.catalog().read().await;
    build(locale, &catalog, selected, quantity, status, notice)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wholesale_core::{CurrencyCode, Variant, VariantId, WholesalePolicy};

    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_products(vec![Product {
            id: ProductId::new(3),
            title: "Dates 1kg".to_string(),
            variants: vec![Variant {
                id: VariantId::new(30),
                price: Decimal::from(40),
            }],
            currency_code: CurrencyCode::USD,
            policy: WholesalePolicy::new(10, Decimal::from(32)).ok(),
        }])
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(None).unwrap(), 1);
        assert_eq!(parse_quantity(Some(" ")).unwrap(), 1);
        assert_eq!(parse_quantity(Some("12")).unwrap(), 12);
        assert!(parse_quantity(Some("1.5")).is_err());
    }

    #[test]
    fn test_build_bulk_quote() {
        let (status, page) = build(
            Locale::En,
            &catalog(),
            Some(ProductId::new(3)),
            10,
            StatusCode::OK,
            None,
        );
        assert_eq!(status, StatusCode::OK);
        let quote = page.quote.unwrap();
        assert!(quote.is_bulk);
        assert!(quote.has_policy);
        assert_eq!(quote.unit_price, "$32.00");
        assert_eq!(quote.total, "$320.00");
        assert_eq!(quote.regular_price, "$40.00");
        assert_eq!(quote.savings.as_deref(), Some("$80.00"));
        assert!(page.products.first().unwrap().selected);
    }

    #[test]
    fn test_build_regular_quote_below_threshold() {
        let (_, page) = build(
            Locale::En,
            &catalog(),
            Some(ProductId::new(3)),
            9,
            StatusCode::OK,
            None,
        );
        let quote = page.quote.unwrap();
        assert!(!quote.is_bulk);
        assert_eq!(quote.unit_price, "$40.00");
        assert!(quote.savings.is_none());
    }

    #[test]
    fn test_build_unknown_product_sets_notice() {
        let (_, page) = build(
            Locale::En,
            &catalog(),
            Some(ProductId::new(99)),
            1,
            StatusCode::OK,
            None,
        );
        assert!(page.quote.is_none());
        let notice = page.notice.unwrap();
        assert_eq!(notice.kind, "error");
        assert_eq!(notice.message, "Product not found");
    }

    #[test]
    fn test_build_without_selection() {
        let (_, page) = build(Locale::Ar, &catalog(), None, 1, StatusCode::OK, None);
        assert!(page.quote.is_none());
        assert!(page.notice.is_none());
        assert!(!page.products.first().unwrap().selected);
    }

    #[test]
    fn test_build_total_too_large_is_bad_request() {
        let mut catalog = catalog();
        let policy = WholesalePolicy::new(1, Decimal::from(10_000_000_000_i64)).unwrap();
        catalog.apply_policy(&ProductId::new(3), policy).unwrap();

        let (status, page) = build(
            Locale::En,
            &catalog,
            Some(ProductId::new(3)),
            i64::MAX,
            StatusCode::OK,
            None,
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(page.quote.is_none());
        assert_eq!(
            page.notice.unwrap().message,
            format!("Invalid value: Quantity {} is too large to price", i64::MAX)
        );
    }
}
