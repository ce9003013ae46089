//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use checkout::CheckoutError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// No caller identity was supplied.
    Unauthorized(String),
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Order creation failure.
    Checkout(CheckoutError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Checkout(err) => checkout_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "message": message });
        (status, axum::Json(body)).into_response()
    }
}

fn checkout_error_to_response(err: CheckoutError) -> (StatusCode, String) {
    match &err {
        CheckoutError::CartNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        CheckoutError::EmptyCart | CheckoutError::InvalidAddress(_) => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        CheckoutError::CartServiceUnavailable(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
        }
        CheckoutError::InsufficientStock { .. } => (StatusCode::CONFLICT, err.to_string()),
        CheckoutError::CurrencyMismatch { .. }
        | CheckoutError::TotalOutOfRange
        | CheckoutError::PersistenceError(_) => {
            tracing::error!(error = %err, "order creation failed server-side");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        ApiError::Checkout(err)
    }
}

impl From<order_store::OrderStoreError> for ApiError {
    fn from(err: order_store::OrderStoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<inventory::InventoryError> for ApiError {
    fn from(err: inventory::InventoryError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
