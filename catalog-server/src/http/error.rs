//! API error types with IntoResponse
//!
//! Every failure leaves the server as `{"error": "<message>"}`. Store
//! failures are logged in full and answered with a generic message.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::{ProductId, ValidationError};

/// Message sent for any 500
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// Message sent for any 404 on a product
pub const NOT_FOUND_MESSAGE: &str = "Product not found";

/// Message sent when a request exceeds its deadline
pub const TIMEOUT_MESSAGE: &str = "request timed out";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed id or body (400)
    Validation(ValidationError),

    /// No product with this id (404)
    NotFound { id: ProductId },

    /// Store failure (500, logged)
    Database(DbError),

    /// Request exceeded its deadline (408, logged)
    Timeout { after: Duration },

    /// Internal error (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Validation(e) => {
                tracing::debug!(error = ?e, "rejected request input");
                e.to_string()
            }
            Self::NotFound { id } => {
                tracing::debug!(%id, "product not found");
                NOT_FOUND_MESSAGE.to_owned()
            }
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                INTERNAL_MESSAGE.to_owned()
            }
            Self::Timeout { after } => {
                tracing::warn!(?after, "request timed out");
                TIMEOUT_MESSAGE.to_owned()
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                INTERNAL_MESSAGE.to_owned()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { id } => Self::NotFound { id },
            _ => Self::Database(e),
        }
    }
}
