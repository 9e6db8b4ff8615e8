//! Route and compliance lookup errors.

use thiserror::Error;

use fueleu_shared::{AppError, RouteId, ShipId, ShipIdError};

use crate::store::StoreError;

/// Errors that can occur while reading routes or compliance balances.
#[derive(Debug, Error)]
pub enum RouteError {
    /// No route record with this id.
    #[error("Route with ID {0} not found")]
    RouteNotFound(RouteId),

    /// No compliance calculation for the ship-year.
    #[error("No compliance balance for ship {ship_id} in {year}")]
    ComplianceNotFound {
        /// The ship.
        ship_id: ShipId,
        /// The requested year.
        year: i32,
    },

    /// Ship identifier is malformed.
    #[error("Invalid ship id: {0}")]
    InvalidShipId(#[from] ShipIdError),

    /// Route or compliance provider failed.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl RouteError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::RouteNotFound(_) => "ROUTE_NOT_FOUND",
            Self::ComplianceNotFound { .. } => "COMPLIANCE_NOT_FOUND",
            Self::InvalidShipId(_) => "INVALID_SHIP_ID",
            Self::Storage(err) => err.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::RouteNotFound(_) | Self::ComplianceNotFound { .. } => 404,
            Self::InvalidShipId(_) => 400,
            Self::Storage(err) => err.http_status_code(),
        }
    }
}

impl From<RouteError> for AppError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::RouteNotFound(_) | RouteError::ComplianceNotFound { .. } => {
                Self::NotFound(err.to_string())
            }
            RouteError::InvalidShipId(_) => Self::Validation(err.to_string()),
            RouteError::Storage(store) => store.into(),
        }
    }
}
