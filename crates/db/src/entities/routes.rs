//! `SeaORM` Entity for routes table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "routes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub ship_id: String,
    pub year: i32,
    pub vessel_type: String,
    pub fuel_type: String,
    #[sea_orm(column_type = "Decimal(Some((12, 4)))")]
    pub ghg_intensity: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub fuel_consumption: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub distance: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub total_emissions: Decimal,
    pub is_baseline: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
