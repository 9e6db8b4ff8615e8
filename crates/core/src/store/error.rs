//! Errors raised by ledger and route storage backends.

use thiserror::Error;

/// Failure of an external storage collaborator.
///
/// These are infrastructure failures. The core surfaces them unchanged and
/// never retries, since a blind retry of a ledger append could double-apply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Backend could not be reached or the connection dropped.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Backend rejected the unit of work (serialization failure, lock timeout).
    #[error("Storage conflict: {0}")]
    Conflict(String),

    /// Backend returned data that does not map onto the domain types.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl StoreError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "STORAGE_UNAVAILABLE",
            Self::Conflict(_) => "STORAGE_CONFLICT",
            Self::Corrupt(_) => "STORAGE_CORRUPT",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::Unavailable(_) => 503,
            Self::Conflict(_) | Self::Corrupt(_) => 500,
        }
    }
}

impl From<StoreError> for fueleu_shared::AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => Self::ServiceUnavailable(msg),
            StoreError::Conflict(msg) | StoreError::Corrupt(msg) => Self::Database(msg),
        }
    }
}
