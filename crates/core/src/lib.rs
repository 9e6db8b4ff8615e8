//! Core business logic for the FuelEU compliance ledger.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Storage is reached only through the async ports in [`store`].
//!
//! # Modules
//!
//! - `banking` - Append-only CB banking ledger
//! - `pooling` - Greedy CB redistribution among pool members
//! - `compliance` - Ship-year records and compliance balances
//! - `store` - Ledger and route/CB provider ports, plus in-memory implementations

pub mod banking;
pub mod compliance;
pub mod pooling;
pub mod store;
