//! Collaborator ports: the ledger store and the route/CB provider.
//!
//! The core never talks to a database directly. It consumes these traits,
//! implemented over PostgreSQL in `fueleu-db` and in process by [`memory`].

pub mod demo;
pub mod error;
pub mod memory;

use async_trait::async_trait;
use rust_decimal::Decimal;

use fueleu_shared::types::{RouteId, ShipId};

use crate::banking::entry::{BankEntry, NewBankEntry};
use crate::compliance::types::{ComplianceCalculation, ShipYearRecord};

pub use error::StoreError;
pub use memory::{InMemoryFleet, InMemoryLedger};

/// Durable append-only record of banking entries.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Opens the per-ship serialization boundary.
    ///
    /// While the returned session is alive, no other session for the same
    /// ship can read or append. Appends become visible on `commit`; dropping
    /// the session discards them.
    async fn lock_ship(&self, ship_id: &ShipId) -> Result<Box<dyn ShipLedger>, StoreError>;

    /// Returns the ship's entries in commit order.
    async fn entries(&self, ship_id: &ShipId) -> Result<Vec<BankEntry>, StoreError>;

    /// Returns the algebraic sum of the ship's committed entries.
    async fn total_banked(&self, ship_id: &ShipId) -> Result<Decimal, StoreError> {
        checked_sum(self.entries(ship_id).await?.iter().map(|entry| entry.amount))
    }
}

/// Adds ledger amounts, failing with `Corrupt` instead of overflowing.
///
/// # Errors
///
/// Returns `StoreError::Corrupt` if the sum does not fit in a `Decimal`.
pub fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal, StoreError> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, Decimal::checked_add)
        .ok_or_else(|| StoreError::Corrupt("ledger balance overflows a decimal".to_string()))
}

/// A serialized unit of work on one ship's ledger.
#[async_trait]
pub trait ShipLedger: Send {
    /// Banked balance as seen inside this session.
    async fn balance(&mut self) -> Result<Decimal, StoreError>;

    /// Appends an entry; it becomes durable on `commit`.
    async fn append(&mut self, entry: NewBankEntry) -> Result<BankEntry, StoreError>;

    /// Publishes the session's appends and releases the ship.
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}

/// Source of ship-year route records.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// All route records.
    async fn list_routes(&self) -> Result<Vec<ShipYearRecord>, StoreError>;

    /// Whether the ship has at least one route record.
    async fn ship_exists(&self, ship_id: &ShipId) -> Result<bool, StoreError>;

    /// Marks a record as its ship's baseline and clears the flag on the
    /// ship's other records. Returns `None` if the record does not exist.
    async fn set_baseline(&self, route_id: RouteId) -> Result<Option<ShipYearRecord>, StoreError>;
}

/// Source of precomputed compliance balances.
#[async_trait]
pub trait ComplianceProvider: Send + Sync {
    /// Compliance calculations for the given ships in `year`.
    ///
    /// Ships without a calculation are simply absent from the result.
    async fn compliance_for(
        &self,
        ship_ids: &[ShipId],
        year: i32,
    ) -> Result<Vec<ComplianceCalculation>, StoreError>;
}
