//! Banking ledger repository.
//!
//! Implements [`LedgerStore`] over the append-only `bank_entries` table. Each
//! ship session is a [`ShipLock`] transaction, so the balance read and the
//! append that depends on it commit together or not at all.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::debug;

use fueleu_core::banking::{BankEntry, NewBankEntry};
use fueleu_core::store::{LedgerStore, ShipLedger, StoreError};
use fueleu_shared::{BankEntryId, ShipId};

use super::{store_error, stored_ship_id};
use crate::entities::bank_entries;
use crate::lock::ShipLock;

/// Ledger store backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct BankingRepository {
    db: DatabaseConnection,
}

impl BankingRepository {
    /// Creates a new banking repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LedgerStore for BankingRepository {
    async fn lock_ship(&self, ship_id: &ShipId) -> Result<Box<dyn ShipLedger>, StoreError> {
        let lock = ShipLock::acquire(&self.db, ship_id)
            .await
            .map_err(store_error)?;
        debug!(ship_id = %ship_id, "Ship ledger locked");
        Ok(Box::new(PgShipLedger {
            lock,
            ship_id: ship_id.clone(),
        }))
    }

    async fn entries(&self, ship_id: &ShipId) -> Result<Vec<BankEntry>, StoreError> {
        bank_entries::Entity::find()
            .filter(bank_entries::Column::ShipId.eq(ship_id.as_str()))
            .order_by_asc(bank_entries::Column::CreatedAt)
            .order_by_asc(bank_entries::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(to_entry)
            .collect()
    }

    async fn total_banked(&self, ship_id: &ShipId) -> Result<Decimal, StoreError> {
        sum_for_ship(&self.db, ship_id).await
    }
}

struct PgShipLedger {
    lock: ShipLock,
    ship_id: ShipId,
}

#[async_trait]
impl ShipLedger for PgShipLedger {
    async fn balance(&mut self) -> Result<Decimal, StoreError> {
        sum_for_ship(self.lock.transaction(), &self.ship_id).await
    }

    async fn append(&mut self, entry: NewBankEntry) -> Result<BankEntry, StoreError> {
        let model = bank_entries::ActiveModel {
            id: Set(BankEntryId::new().into_inner()),
            ship_id: Set(entry.ship_id.as_str().to_owned()),
            year: Set(entry.year),
            amount_gco2eq: Set(entry.amount),
            created_at: Set(Utc::now().into()),
        }
        .insert(self.lock.transaction())
        .await
        .map_err(store_error)?;

        to_entry(model)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.lock.commit().await.map_err(store_error)
    }
}

/// `SUM(amount_gco2eq)` for one ship; zero when it has no entries.
async fn sum_for_ship<C: ConnectionTrait>(db: &C, ship_id: &ShipId) -> Result<Decimal, StoreError> {
    let total: Option<Option<Decimal>> = bank_entries::Entity::find()
        .select_only()
        .column_as(bank_entries::Column::AmountGco2eq.sum(), "total")
        .filter(bank_entries::Column::ShipId.eq(ship_id.as_str()))
        .into_tuple()
        .one(db)
        .await
        .map_err(store_error)?;

    Ok(total.flatten().unwrap_or(Decimal::ZERO))
}

fn to_entry(model: bank_entries::Model) -> Result<BankEntry, StoreError> {
    Ok(BankEntry {
        id: BankEntryId::from_uuid(model.id),
        ship_id: stored_ship_id(&model.ship_id)?,
        year: model.year,
        amount: model.amount_gco2eq,
        created_at: model.created_at.with_timezone(&Utc),
    })
}
