//! Ship-year route records and compliance balances.
//!
//! The core treats the compliance balance as a precomputed input; this module
//! only models it and reads it through the provider ports.

pub mod error;
pub mod service;
pub mod types;

pub use error::RouteError;
pub use service::RouteService;
pub use types::{ComplianceCalculation, ShipYearRecord};
