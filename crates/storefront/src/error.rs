//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`; every error body is JSON with an `error` field.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::order::OrderError;
use crate::services::{NovaPoshtaError, TelegramError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Order failed validation.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Sending the order notification failed.
    #[error("Telegram error: {0}")]
    Telegram(#[from] TelegramError),

    /// Address lookup failed.
    #[error("Nova Poshta error: {0}")]
    NovaPoshta(#[from] NovaPoshtaError),

    /// An integration the route needs has no configuration.
    #[error("{0} configuration missing")]
    NotConfigured(&'static str),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Order(OrderError::Unavailable(_)) => StatusCode::CONFLICT,
            Self::Order(_)
            | Self::BadRequest(_)
            | Self::NovaPoshta(NovaPoshtaError::Rejected { .. }) => StatusCode::BAD_REQUEST,
            Self::Telegram(_) | Self::NovaPoshta(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::NotConfigured(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Internal(_)
                | Self::NotConfigured(_)
                | Self::Telegram(_)
                | Self::NovaPoshta(NovaPoshtaError::Http(_) | NovaPoshtaError::Status(_))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let body = match &self {
            Self::Order(OrderError::Unavailable(ids)) => json!({
                "error": "Some items are no longer available",
                "unavailable": ids,
            }),
            Self::Order(err) => json!({ "error": err.to_string() }),
            Self::Telegram(_) => json!({ "error": "Failed to send order to Telegram" }),
            Self::NovaPoshta(NovaPoshtaError::Rejected { errors, warnings }) => json!({
                "error": "Nova Poshta API error",
                "details": errors,
                "warnings": warnings,
            }),
            Self::NovaPoshta(_) => json!({ "error": "External service error" }),
            Self::NotConfigured(_) | Self::NotFound(_) => json!({ "error": self.to_string() }),
            Self::BadRequest(message) => json!({ "error": message }),
            Self::Internal(_) => json!({ "error": "Internal server error" }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
