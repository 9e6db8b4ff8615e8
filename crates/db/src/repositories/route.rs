//! Route record repository.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait, sea_query::Expr,
};
use tracing::info;

use fueleu_core::compliance::ShipYearRecord;
use fueleu_core::store::{RouteProvider, StoreError};
use fueleu_shared::{RouteId, ShipId};

use super::{store_error, stored_ship_id};
use crate::entities::routes;

/// Route provider backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct RouteRepository {
    db: DatabaseConnection,
}

impl RouteRepository {
    /// Creates a new route repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RouteProvider for RouteRepository {
    async fn list_routes(&self) -> Result<Vec<ShipYearRecord>, StoreError> {
        routes::Entity::find()
            .order_by_asc(routes::Column::Year)
            .order_by_asc(routes::Column::ShipId)
            .all(&self.db)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(to_record)
            .collect()
    }

    async fn ship_exists(&self, ship_id: &ShipId) -> Result<bool, StoreError> {
        let count = routes::Entity::find()
            .filter(routes::Column::ShipId.eq(ship_id.as_str()))
            .count(&self.db)
            .await
            .map_err(store_error)?;
        Ok(count > 0)
    }

    async fn set_baseline(&self, route_id: RouteId) -> Result<Option<ShipYearRecord>, StoreError> {
        let txn = self.db.begin().await.map_err(store_error)?;

        let Some(target) = routes::Entity::find_by_id(route_id.into_inner())
            .one(&txn)
            .await
            .map_err(store_error)?
        else {
            return Ok(None);
        };

        // Clear first so the one-baseline-per-ship index never sees two.
        routes::Entity::update_many()
            .col_expr(routes::Column::IsBaseline, Expr::value(false))
            .filter(routes::Column::ShipId.eq(target.ship_id.as_str()))
            .filter(routes::Column::Id.ne(target.id))
            .exec(&txn)
            .await
            .map_err(store_error)?;

        routes::Entity::update_many()
            .col_expr(routes::Column::IsBaseline, Expr::value(true))
            .filter(routes::Column::Id.eq(target.id))
            .exec(&txn)
            .await
            .map_err(store_error)?;

        txn.commit().await.map_err(store_error)?;

        info!(route_id = %target.id, ship_id = %target.ship_id, "Baseline route updated");

        Ok(Some(to_record(routes::Model {
            is_baseline: true,
            ..target
        })?))
    }
}

fn to_record(model: routes::Model) -> Result<ShipYearRecord, StoreError> {
    Ok(ShipYearRecord {
        id: RouteId::from_uuid(model.id),
        ship_id: stored_ship_id(&model.ship_id)?,
        year: model.year,
        vessel_type: model.vessel_type,
        fuel_type: model.fuel_type,
        ghg_intensity: model.ghg_intensity,
        fuel_consumption: model.fuel_consumption,
        distance: model.distance,
        total_emissions: model.total_emissions,
        is_baseline: model.is_baseline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn test_to_record_maps_columns() {
        let id = Uuid::now_v7();
        let record = to_record(routes::Model {
            id,
            ship_id: "R003".to_string(),
            year: 2025,
            vessel_type: "Tanker".to_string(),
            fuel_type: "MGO".to_string(),
            ghg_intensity: dec!(93.5),
            fuel_consumption: dec!(5100),
            distance: dec!(12500),
            total_emissions: dec!(4700),
            is_baseline: true,
            created_at: Utc::now().into(),
        })
        .unwrap();

        assert_eq!(record.id, RouteId::from_uuid(id));
        assert_eq!(record.ship_id.as_str(), "R003");
        assert_eq!(record.ghg_intensity, dec!(93.5));
        assert!(record.is_baseline);
    }
}
