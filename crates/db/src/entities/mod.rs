//! `SeaORM` entity definitions.

pub mod prelude;

pub mod bank_entries;
pub mod routes;
pub mod ship_compliance;
