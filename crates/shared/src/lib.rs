//! Shared identifiers, errors, and configuration for the FuelEU compliance ledger.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for route records and ledger entries
//! - The validated `ShipId` newtype
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, StorageBackend};
pub use error::{AppError, AppResult};
pub use types::{BankEntryId, RouteId, ShipId, ShipIdError};
