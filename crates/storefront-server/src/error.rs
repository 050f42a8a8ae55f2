//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use storefront_core::StorefrontError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// A storefront error on its way out as a JSON response
#[derive(Debug)]
pub struct ApiError(pub StorefrontError);

impl From<StorefrontError> for ApiError {
    fn from(err: StorefrontError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            StorefrontError::Provider(_) => (StatusCode::BAD_GATEWAY, "PROVIDER_UNAVAILABLE"),
            StorefrontError::ProductNotFound(_) => (StatusCode::NOT_FOUND, "PRODUCT_NOT_FOUND"),
            StorefrontError::MissingParameter(_) => (StatusCode::BAD_REQUEST, "MISSING_PARAMETER"),
            StorefrontError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            StorefrontError::DataIntegrity(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "DATA_INTEGRITY")
            }
            StorefrontError::Checkout(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CHECKOUT_ERROR"),
            StorefrontError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(code, error = %self.0, "Request failed");
        } else {
            tracing::warn!(code, error = %self.0, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.0.user_message().to_string(),
            code: code.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
