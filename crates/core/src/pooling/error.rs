//! Pool error types.

use thiserror::Error;

use fueleu_shared::{AppError, ShipId, ShipIdError};

use crate::store::StoreError;

/// Errors that can occur while forming a pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// No members were supplied.
    #[error("Pool must have at least one member")]
    EmptyPool,

    /// A member identifier is malformed.
    #[error("Invalid ship id: {0}")]
    InvalidShipId(#[from] ShipIdError),

    /// Some members have no compliance balance for the year.
    #[error("No compliance balance for year {year}: {}", join(.ship_ids))]
    MissingMembers {
        /// Pool year.
        year: i32,
        /// Missing ships, sorted.
        ship_ids: Vec<ShipId>,
    },

    /// Compliance provider failed.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

fn join(ship_ids: &[ShipId]) -> String {
    ship_ids
        .iter()
        .map(ShipId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl PoolError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyPool => "EMPTY_POOL",
            Self::InvalidShipId(_) => "INVALID_SHIP_ID",
            Self::MissingMembers { .. } => "COMPLIANCE_NOT_FOUND",
            Self::Storage(err) => err.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::EmptyPool | Self::InvalidShipId(_) => 400,
            Self::MissingMembers { .. } => 404,
            Self::Storage(err) => err.http_status_code(),
        }
    }
}

impl From<PoolError> for AppError {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::EmptyPool | PoolError::InvalidShipId(_) => Self::Validation(err.to_string()),
            PoolError::MissingMembers { .. } => Self::NotFound(err.to_string()),
            PoolError::Storage(store) => store.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_members_lists_every_id() {
        let err = PoolError::MissingMembers {
            year: 2024,
            ship_ids: vec![ShipId::parse("R002").unwrap(), ShipId::parse("R007").unwrap()],
        };
        assert_eq!(
            err.to_string(),
            "No compliance balance for year 2024: R002, R007"
        );
        assert_eq!(err.http_status_code(), 404);

        let app: AppError = err.into();
        assert_eq!(app.status_code(), 404);
    }

    #[test]
    fn test_empty_pool_is_validation() {
        assert_eq!(PoolError::EmptyPool.http_status_code(), 400);
        let app: AppError = PoolError::EmptyPool.into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_storage_maps_through() {
        let err = PoolError::Storage(StoreError::Unavailable("down".into()));
        assert_eq!(err.http_status_code(), 503);
        let app: AppError = err.into();
        assert!(app.is_infrastructure());
    }
}
