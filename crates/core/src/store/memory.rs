//! In-process ledger store and route/CB provider.
//!
//! Used by tests and by the server's `memory` storage backend. Each ship's
//! ledger sits behind its own async mutex, which is the serialization
//! boundary handed out by [`LedgerStore::lock_ship`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use fueleu_shared::types::{RouteId, ShipId};

use super::{
    ComplianceProvider, LedgerStore, RouteProvider, ShipLedger, StoreError, checked_sum,
};
use crate::banking::entry::{BankEntry, NewBankEntry};
use crate::compliance::types::{ComplianceCalculation, ShipYearRecord};

type SharedLedger = Arc<Mutex<Vec<BankEntry>>>;

/// Ledger store backed by per-ship vectors.
///
/// A ship's slot is created when a session opens and removed again when the
/// last session on it ends without any committed entries, so lookups of
/// ships that never banked leave nothing behind.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    ships: Arc<DashMap<ShipId, SharedLedger>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn ledger(&self, ship_id: &ShipId) -> SharedLedger {
        Arc::clone(self.ships.entry(ship_id.clone()).or_default().value())
    }

    fn existing(&self, ship_id: &ShipId) -> Option<SharedLedger> {
        self.ships.get(ship_id).map(|ledger| Arc::clone(ledger.value()))
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn lock_ship(&self, ship_id: &ShipId) -> Result<Box<dyn ShipLedger>, StoreError> {
        let guard = self.ledger(ship_id).lock_owned().await;
        Ok(Box::new(InMemoryShipLedger {
            ships: Arc::clone(&self.ships),
            ship_id: ship_id.clone(),
            committed: Some(guard),
            pending: Vec::new(),
        }))
    }

    async fn entries(&self, ship_id: &ShipId) -> Result<Vec<BankEntry>, StoreError> {
        match self.existing(ship_id) {
            Some(ledger) => Ok(ledger.lock().await.clone()),
            None => Ok(Vec::new()),
        }
    }
}

struct InMemoryShipLedger {
    ships: Arc<DashMap<ShipId, SharedLedger>>,
    ship_id: ShipId,
    /// `Some` for the whole session; taken only in `drop`.
    committed: Option<OwnedMutexGuard<Vec<BankEntry>>>,
    pending: Vec<BankEntry>,
}

impl InMemoryShipLedger {
    fn committed(&self) -> &[BankEntry] {
        self.committed.as_deref().map(Vec::as_slice).unwrap_or_default()
    }
}

#[async_trait]
impl ShipLedger for InMemoryShipLedger {
    async fn balance(&mut self) -> Result<Decimal, StoreError> {
        checked_sum(
            self.committed()
                .iter()
                .chain(self.pending.iter())
                .map(|entry| entry.amount),
        )
    }

    async fn append(&mut self, entry: NewBankEntry) -> Result<BankEntry, StoreError> {
        let entry = entry.into_entry(Utc::now());
        self.pending.push(entry.clone());
        Ok(entry)
    }

    async fn commit(mut self: Box<Self>) -> Result<(), StoreError> {
        let pending = std::mem::take(&mut self.pending);
        if let Some(committed) = self.committed.as_mut() {
            committed.extend(pending);
        }
        Ok(())
    }
}

impl Drop for InMemoryShipLedger {
    fn drop(&mut self) {
        let Some(guard) = self.committed.take() else {
            return;
        };
        let empty = guard.is_empty();
        drop(guard);

        // Only the map still holds an empty, unlocked slot: nobody is waiting on it.
        if empty {
            self.ships.remove_if(&self.ship_id, |_, ledger| {
                Arc::strong_count(ledger) == 1
                    && ledger.try_lock().is_ok_and(|entries| entries.is_empty())
            });
        }
    }
}

/// Route records and compliance balances held in memory.
#[derive(Debug, Default)]
pub struct InMemoryFleet {
    routes: RwLock<Vec<ShipYearRecord>>,
    compliance: RwLock<Vec<ComplianceCalculation>>,
}

impl InMemoryFleet {
    /// Creates a fleet from known records and calculations.
    #[must_use]
    pub fn new(routes: Vec<ShipYearRecord>, compliance: Vec<ComplianceCalculation>) -> Self {
        Self {
            routes: RwLock::new(routes),
            compliance: RwLock::new(compliance),
        }
    }
}

#[async_trait]
impl RouteProvider for InMemoryFleet {
    async fn list_routes(&self) -> Result<Vec<ShipYearRecord>, StoreError> {
        let mut routes = self.routes.read().await.clone();
        routes.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.ship_id.cmp(&b.ship_id)));
        Ok(routes)
    }

    async fn ship_exists(&self, ship_id: &ShipId) -> Result<bool, StoreError> {
        Ok(self
            .routes
            .read()
            .await
            .iter()
            .any(|record| &record.ship_id == ship_id))
    }

    async fn set_baseline(&self, route_id: RouteId) -> Result<Option<ShipYearRecord>, StoreError> {
        let mut routes = self.routes.write().await;
        let Some(ship_id) = routes
            .iter()
            .find(|record| record.id == route_id)
            .map(|record| record.ship_id.clone())
        else {
            return Ok(None);
        };

        let mut updated = None;
        for record in routes.iter_mut().filter(|record| record.ship_id == ship_id) {
            record.is_baseline = record.id == route_id;
            if record.is_baseline {
                updated = Some(record.clone());
            }
        }
        Ok(updated)
    }
}

#[async_trait]
impl ComplianceProvider for InMemoryFleet {
    async fn compliance_for(
        &self,
        ship_ids: &[ShipId],
        year: i32,
    ) -> Result<Vec<ComplianceCalculation>, StoreError> {
        Ok(self
            .compliance
            .read()
            .await
            .iter()
            .filter(|calculation| calculation.year == year && ship_ids.contains(&calculation.ship_id))
            .cloned()
            .collect())
    }
}
