//! `SeaORM` Entity for ship_compliance table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ship_compliance")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub ship_id: String,
    pub year: i32,
    pub vessel_type: String,
    #[sea_orm(column_type = "Decimal(Some((12, 4)))")]
    pub target_intensity: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 4)))")]
    pub actual_intensity: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub fuel_consumption: Decimal,
    #[sea_orm(column_type = "Decimal(Some((28, 4)))")]
    pub energy_in_scope: Decimal,
    #[sea_orm(column_type = "Decimal(Some((28, 4)))")]
    pub cb_gco2eq: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
