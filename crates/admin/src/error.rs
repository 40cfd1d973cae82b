//! Unified error handling for admin.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::shopify::AdminShopifyError;

/// Message returned when no access token is available for the store.
pub const NO_SESSION: &str = "No active session found";

/// Message returned when the product does not exist in the store.
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Application-level error type for the admin.
#[derive(Debug, Error)]
pub enum AppError {
    /// No usable store session.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The store rejected the submitted values.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Shopify asked us to slow down.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Shopify API operation failed.
    #[error("Shopify error: {source}")]
    Shopify {
        /// Client-facing summary of the failed operation.
        context: &'static str,
        #[source]
        source: AdminShopifyError,
    },

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Replace the client-facing summary of an upstream failure.
    ///
    /// Other variants already carry a specific message and are unchanged.
    #[must_use]
    pub fn context(self, context: &'static str) -> Self {
        match self {
            Self::Shopify { source, .. } => Self::Shopify { context, source },
            other => other,
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::Shopify { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Unauthorized(message)
            | Self::NotFound(message)
            | Self::BadRequest(message)
            | Self::Validation(message) => message.clone(),
            Self::RateLimited(_) => self.to_string(),
            Self::Shopify { context, .. } => (*context).to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Log the error at a level matching its severity.
    ///
    /// Server-side failures are also reported to Sentry.
    pub fn report(&self) {
        if matches!(self, Self::Shopify { .. } | Self::Internal(_)) {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }
    }
}

impl From<AdminShopifyError> for AppError {
    fn from(err: AdminShopifyError) -> Self {
        match err {
            AdminShopifyError::NoAccessToken | AdminShopifyError::Unauthorized(_) => {
                Self::Unauthorized(NO_SESSION.to_string())
            }
            AdminShopifyError::NotFound(_) => Self::NotFound(PRODUCT_NOT_FOUND.to_string()),
            AdminShopifyError::UserErrors(errors) => Self::Validation(
                errors
                    .first()
                    .map_or_else(|| "Invalid input".to_string(), |e| e.message.clone()),
            ),
            AdminShopifyError::RateLimited(retry_after) => Self::RateLimited(retry_after),
            source => Self::Shopify {
                context: "External service error",
                source,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.report();
        let status = self.status();
        (status, Json(json!({ "error": self.client_message() }))).into_response()
    }
}
