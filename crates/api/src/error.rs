//! Error-to-response mapping.
//!
//! Every handler error becomes `{ "error": CODE, "message": text }` with the
//! status of the underlying [`AppError`]. Infrastructure failures are logged
//! here and their details are not echoed to the caller.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use fueleu_core::banking::BankingError;
use fueleu_core::compliance::RouteError;
use fueleu_core::pooling::PoolError;
use fueleu_shared::AppError;

/// Handler error carrying the module's specific error code.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    code: &'static str,
}

impl ApiError {
    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn public_message(&self) -> String {
        match self.error {
            AppError::ServiceUnavailable(_) => "Storage is temporarily unavailable".to_string(),
            _ if self.error.is_infrastructure() => "An internal error occurred".to_string(),
            _ => self.error.message().to_string(),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self {
            code: error.error_code(),
            error,
        }
    }
}

impl From<BankingError> for ApiError {
    fn from(err: BankingError) -> Self {
        Self {
            code: err.error_code(),
            error: err.into(),
        }
    }
}

impl From<PoolError> for ApiError {
    fn from(err: PoolError) -> Self {
        Self {
            code: err.error_code(),
            error: err.into(),
        }
    }
}

impl From<RouteError> for ApiError {
    fn from(err: RouteError) -> Self {
        Self {
            code: err.error_code(),
            error: err.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text()).into()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text()).into()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.error.is_infrastructure() {
            error!(code = self.code, error = %self.error, "Request failed");
        } else {
            debug!(code = self.code, error = %self.error, "Request rejected");
        }

        (
            status,
            Json(json!({
                "error": self.code,
                "message": self.public_message(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fueleu_core::store::StoreError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_banking_error_keeps_specific_code() {
        let err: ApiError = BankingError::InsufficientBalance {
            available: dec!(60),
            requested: dec!(61),
        }
        .into();
        assert_eq!(err.code(), "INSUFFICIENT_BALANCE");
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            err.public_message(),
            "Insufficient banked balance. Available: 60, Requested: 61"
        );
    }

    #[test]
    fn test_storage_details_are_hidden() {
        let err: ApiError =
            PoolError::Storage(StoreError::Unavailable("10.0.0.4:5432 refused".into())).into();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code(), "STORAGE_UNAVAILABLE");
        assert!(!err.public_message().contains("10.0.0.4"));

        let err: ApiError =
            RouteError::Storage(StoreError::Corrupt("bad numeric".into())).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "An internal error occurred");
    }
}
