//! Banking error types.

use rust_decimal::Decimal;
use thiserror::Error;

use fueleu_shared::{AppError, ShipId, ShipIdError};

use super::balance::LedgerViolation;
use crate::store::StoreError;

/// Errors that can occur during banking operations.
#[derive(Debug, Error)]
pub enum BankingError {
    // ========== Input Errors ==========
    /// Deposit or withdrawal amount is zero or negative.
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Amount exceeds what a single ledger entry can hold.
    #[error("Amount {amount} exceeds the maximum of {max}")]
    AmountTooLarge {
        /// Amount that was requested.
        amount: Decimal,
        /// Largest accepted amount.
        max: Decimal,
    },

    /// Amount has more decimal places than the ledger stores.
    #[error("Amount {amount} has more than {max_scale} decimal places")]
    AmountTooPrecise {
        /// Amount that was requested.
        amount: Decimal,
        /// Decimal places the ledger keeps.
        max_scale: u32,
    },

    /// Ship identifier is malformed.
    #[error("Invalid ship id: {0}")]
    InvalidShipId(#[from] ShipIdError),

    // ========== Lookup Errors ==========
    /// No route record exists for the ship.
    #[error("Ship with ID {0} not found")]
    ShipNotFound(ShipId),

    // ========== Balance Errors ==========
    /// Withdrawal exceeds the banked balance.
    #[error("Insufficient banked balance. Available: {available}, Requested: {requested}")]
    InsufficientBalance {
        /// Banked balance at the time of the check.
        available: Decimal,
        /// Amount that was requested.
        requested: Decimal,
    },

    // ========== Infrastructure Errors ==========
    /// Replaying the stored ledger produced a negative balance.
    #[error("Ledger for ship {ship_id} is inconsistent: {violation}")]
    LedgerCorrupted {
        /// The ship whose ledger failed replay.
        ship_id: ShipId,
        /// Where replay went negative.
        violation: LedgerViolation,
    },

    /// Ledger store failed.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl BankingError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) | Self::AmountTooLarge { .. } | Self::AmountTooPrecise { .. } => {
                "INVALID_AMOUNT"
            }
            Self::InvalidShipId(_) => "INVALID_SHIP_ID",
            Self::ShipNotFound(_) => "SHIP_NOT_FOUND",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::LedgerCorrupted { .. } => "LEDGER_CORRUPTED",
            Self::Storage(err) => err.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount(_)
            | Self::AmountTooLarge { .. }
            | Self::AmountTooPrecise { .. }
            | Self::InvalidShipId(_) => 400,
            Self::ShipNotFound(_) => 404,
            Self::InsufficientBalance { .. } => 422,
            Self::LedgerCorrupted { .. } => 500,
            Self::Storage(err) => err.http_status_code(),
        }
    }

    /// Returns true if the failure came from storage rather than the request.
    #[must_use]
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::LedgerCorrupted { .. })
    }
}

impl From<BankingError> for AppError {
    fn from(err: BankingError) -> Self {
        match err {
            BankingError::InvalidAmount(_)
            | BankingError::AmountTooLarge { .. }
            | BankingError::AmountTooPrecise { .. }
            | BankingError::InvalidShipId(_) => Self::Validation(err.to_string()),
            BankingError::ShipNotFound(_) => Self::NotFound(err.to_string()),
            BankingError::InsufficientBalance { .. } => Self::BusinessRule(err.to_string()),
            BankingError::LedgerCorrupted { .. } => Self::Internal(err.to_string()),
            BankingError::Storage(store) => store.into(),
        }
    }
}
