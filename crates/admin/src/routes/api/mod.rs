//! JSON API handlers.
//!
//! Every failure is answered with `{ "error": message }`.

pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the API router.
pub fn router() -> Router<AppState> {
    Router::new().merge(products::router())
}
