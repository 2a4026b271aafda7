//! API error type and HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use caja_core::{CoreError, ProductId};
use caja_protocol::FieldErrors;
use uuid::Uuid;

/// Errors surfaced by the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body failed validation. Serialized as a map of
    /// field name to messages, matching the sync error slots.
    #[error("validation failed")]
    Validation(FieldErrors),

    /// No active product with this id.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// No active sale with this uuid.
    #[error("sale {0} not found")]
    SaleNotFound(Uuid),

    /// The request was structurally unacceptable (for example a sync
    /// batch over the configured limit).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// I/O failure while binding or serving.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience alias used throughout the server crate.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::ProductNotFound(_) | Self::SaleNotFound(_) => StatusCode::NOT_FOUND,
            Self::Io(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns true for errors caused by the request rather than the
    /// server.
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Rejected(violations) => {
                Self::Validation(FieldErrors::from_violations(&violations))
            }
            CoreError::ProductNotFound { id } => Self::ProductNotFound(id),
            CoreError::SaleNotFound { uuid } => Self::SaleNotFound(uuid),
            CoreError::InvalidOperation { message } => Self::InvalidRequest(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        match self {
            Self::Validation(errors) => (status, Json(errors)).into_response(),
            other => {
                let body = serde_json::json!({ "error": other.to_string() });
                (status, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caja_core::Violation;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::ProductNotFound(ProductId::new(1)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::InvalidRequest("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn rejection_converts_to_field_errors() {
        let core = CoreError::Rejected(vec![Violation::new("total", "must be greater than 0")]);
        let api = ApiError::from(core);
        let ApiError::Validation(errors) = api else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get("total").unwrap(), ["must be greater than 0"]);
        assert!(ApiError::Validation(errors).is_client_error());
    }
}
