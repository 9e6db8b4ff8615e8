//! `SeaORM` entity prelude.

pub use super::bank_entries::Entity as BankEntries;
pub use super::routes::Entity as Routes;
pub use super::ship_compliance::Entity as ShipCompliance;
