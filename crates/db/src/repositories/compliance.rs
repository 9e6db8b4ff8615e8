//! Compliance balance repository.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use fueleu_core::compliance::ComplianceCalculation;
use fueleu_core::store::{ComplianceProvider, StoreError};
use fueleu_shared::ShipId;

use super::{store_error, stored_ship_id};
use crate::entities::ship_compliance;

/// Compliance provider backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct ComplianceRepository {
    db: DatabaseConnection,
}

impl ComplianceRepository {
    /// Creates a new compliance repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ComplianceProvider for ComplianceRepository {
    async fn compliance_for(
        &self,
        ship_ids: &[ShipId],
        year: i32,
    ) -> Result<Vec<ComplianceCalculation>, StoreError> {
        if ship_ids.is_empty() {
            return Ok(Vec::new());
        }

        ship_compliance::Entity::find()
            .filter(ship_compliance::Column::Year.eq(year))
            .filter(ship_compliance::Column::ShipId.is_in(ship_ids.iter().map(ShipId::as_str)))
            .order_by_asc(ship_compliance::Column::ShipId)
            .all(&self.db)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(to_calculation)
            .collect()
    }
}

fn to_calculation(model: ship_compliance::Model) -> Result<ComplianceCalculation, StoreError> {
    Ok(ComplianceCalculation {
        ship_id: stored_ship_id(&model.ship_id)?,
        year: model.year,
        vessel_type: model.vessel_type,
        target_intensity: model.target_intensity,
        actual_intensity: model.actual_intensity,
        fuel_consumption: model.fuel_consumption,
        energy_in_scope: model.energy_in_scope,
        cb: model.cb_gco2eq,
    })
}
