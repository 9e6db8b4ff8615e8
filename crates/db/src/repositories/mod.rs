//! Repository abstractions for data access.
//!
//! Repositories implement the core's storage ports over `SeaORM`, hiding the
//! database from the banking and pooling services.

pub mod banking;
pub mod compliance;
pub mod route;

pub use banking::BankingRepository;
pub use compliance::ComplianceRepository;
pub use route::RouteRepository;

use sea_orm::DbErr;
use tracing::error;

use fueleu_core::store::StoreError;
use fueleu_shared::{ShipId, ShipIdError};

/// Classifies a database error for the core.
///
/// Connection problems are `Unavailable`; rows that do not decode are
/// `Corrupt`; anything the server rejected is `Conflict`.
pub(crate) fn store_error(err: DbErr) -> StoreError {
    error!(error = %err, "Database operation failed");
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => StoreError::Unavailable(err.to_string()),
        DbErr::Type(_) | DbErr::TryIntoErr { .. } | DbErr::Json(_) => {
            StoreError::Corrupt(err.to_string())
        }
        _ => StoreError::Conflict(err.to_string()),
    }
}

/// Parses a ship id read back from a row.
pub(crate) fn stored_ship_id(raw: &str) -> Result<ShipId, StoreError> {
    ShipId::parse(raw).map_err(|err: ShipIdError| {
        StoreError::Corrupt(format!("stored ship id {raw:?} is invalid: {err}"))
    })
}
