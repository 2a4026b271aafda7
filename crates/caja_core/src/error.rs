//! Error types for caja core.

use crate::types::ProductId;
use crate::validate::Violations;
use thiserror::Error;
use uuid::Uuid;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in catalog store operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product does not exist or has been soft-deleted.
    #[error("product not found: {id}")]
    ProductNotFound {
        /// The id that was looked up.
        id: ProductId,
    },

    /// Sale does not exist or has been soft-deleted.
    #[error("sale not found: {uuid}")]
    SaleNotFound {
        /// The uuid that was looked up.
        uuid: Uuid,
    },

    /// Record failed field-level validation.
    ///
    /// The attached violations name every offending field; nothing was
    /// written to the store.
    #[error("validation failed on {} field(s)", .0.len())]
    Rejected(Violations),

    /// Operation not permitted in current state.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Description of why the operation is invalid.
        message: String,
    },
}

impl CoreError {
    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Returns true if the error is correctable by the client (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::ProductNotFound { .. }
                | CoreError::SaleNotFound { .. }
                | CoreError::Rejected(_)
                | CoreError::InvalidOperation { .. }
        )
    }
}
