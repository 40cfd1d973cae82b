//! Product table page: view and edit wholesale policies.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;
use wholesale_core::{Catalog, Product};

use crate::{
    error::AppError,
    i18n::{Action, Locale, Texts, describe_error},
    services::{PolicyUpdate, save_policy},
    state::AppState,
};

use super::Notice;

/// Build the product page router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index).post(update))
}

/// One row of the product table.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: u64,
    pub title: String,
    pub price: String,
    pub bulk_quantity: String,
    pub bulk_price: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        // Disabled policies show as empty inputs
        let (bulk_quantity, bulk_price) = match product.policy {
            Some(policy) if policy.is_enabled() => (
                policy.bulk_quantity.to_string(),
                policy.bulk_price.normalize().to_string(),
            ),
            _ => (String::new(), String::new()),
        };

        Self {
            id: product.id.legacy_id(),
            title: product.title.clone(),
            price: product
                .display_price()
                .map_or_else(|| "-".to_string(), |p| p.display()),
            bulk_quantity,
            bulk_price,
        }
    }
}

/// Product table page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub t: &'static Texts,
    pub locale: Locale,
    pub current_path: &'static str,
    pub products: Vec<ProductRow>,
    pub notice: Option<Notice>,
}

impl ProductsIndexTemplate {
    fn new(locale: Locale, catalog: &Catalog, notice: Option<Notice>) -> Self {
        Self {
            t: locale.texts(),
            locale,
            current_path: "/",
            products: catalog.products().iter().map(ProductRow::from).collect(),
            notice,
        }
    }
}

/// Form fields of one table row.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PolicyForm {
    pub product_id: String,
    pub bulk_quantity: String,
    pub bulk_price: String,
}

/// Product table handler.
///
/// Fetches the product list and installs it in the catalog. If the fetch
/// fails, the previous list is shown with an error.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> (StatusCode, ProductsIndexTemplate) {
    let locale = state.locale();
    let (status, notice) = match state.store().list_products(state.page_size()).await {
        Ok(products) => {
            state.catalog().write().await.replace(products);
            (StatusCode::OK, None)
        }
        Err(e) => {
            let err = AppError::from(e).context("Failed to fetch products");
            err.report();
            (
                err.status(),
                Some(Notice::error(describe_error(locale, &err, Action::Fetch))),
            )
        }
    };

    let catalog = state.catalog().read().await;
    (status, ProductsIndexTemplate::new(locale, &catalog, notice))
}

/// Row update handler.
///
/// Saves the submitted policy and re-renders the table from the catalog
/// without fetching the list again.
#[instrument(skip(state, form), fields(product_id = %form.product_id))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<PolicyForm>,
) -> (StatusCode, ProductsIndexTemplate) {
    let locale = state.locale();
    let result =
        match PolicyUpdate::from_form(&form.product_id, &form.bulk_quantity, &form.bulk_price) {
            Ok(update) => save_policy(&state, update).await,
            Err(e) => Err(e),
        };

    let (status, notice) = match result {
        Ok(_) => (
            StatusCode::OK,
            Notice::success(locale.texts().update_saved.to_string()),
        ),
        Err(err) => {
            err.report();
            (
                err.status(),
                Notice::error(describe_error(locale, &err, Action::Update)),
            )
        }
    };

    let catalog = state.catalog().read().await;
    (status, ProductsIndexTemplate::new(locale, &catalog, Some(notice)))
}
