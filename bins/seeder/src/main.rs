//! Database seeder for FuelEU development and testing.
//!
//! Seeds the demonstration fleet: five ship-year route records and their
//! compliance balances. Rows that already exist are left untouched, so the
//! seeder can run repeatedly. It never writes to `bank_entries`.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use fueleu_core::compliance::{ComplianceCalculation, ShipYearRecord};
use fueleu_core::store::demo::demo_fleet;
use fueleu_db::entities::{routes, ship_compliance};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("FUELEU__DATABASE__URL"))
        .expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = fueleu_db::connect(&database_url, 5, 1)
        .await
        .expect("Failed to connect to database");

    let (records, calculations) = demo_fleet();

    println!("Seeding route records...");
    seed_routes(&db, &records).await;

    println!("Seeding compliance balances...");
    seed_compliance(&db, &calculations).await;

    println!("Seeding complete!");
}

/// Returns true when a row for this ship-year already exists.
async fn route_exists(db: &DatabaseConnection, record: &ShipYearRecord) -> bool {
    routes::Entity::find()
        .filter(routes::Column::ShipId.eq(record.ship_id.as_str()))
        .filter(routes::Column::Year.eq(record.year))
        .count(db)
        .await
        .is_ok_and(|count| count > 0)
}

/// Seeds one route record per ship-year.
async fn seed_routes(db: &DatabaseConnection, records: &[ShipYearRecord]) {
    let mut inserted = 0;

    for record in records {
        if route_exists(db, record).await {
            println!(
                "  Route {} ({}) already exists, skipping...",
                record.ship_id, record.year
            );
            continue;
        }

        let route = routes::ActiveModel {
            id: Set(record.id.into_inner()),
            ship_id: Set(record.ship_id.as_str().to_string()),
            year: Set(record.year),
            vessel_type: Set(record.vessel_type.clone()),
            fuel_type: Set(record.fuel_type.clone()),
            ghg_intensity: Set(record.ghg_intensity),
            fuel_consumption: Set(record.fuel_consumption),
            distance: Set(record.distance),
            total_emissions: Set(record.total_emissions),
            is_baseline: Set(record.is_baseline),
            created_at: Set(Utc::now().into()),
        };

        if let Err(e) = route.insert(db).await {
            // Ignore duplicate key errors (inserted concurrently)
            if !e.to_string().contains("duplicate key") {
                eprintln!("Failed to insert route {}: {e}", record.ship_id);
            }
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} route records");
}

/// Seeds the compliance balance of each ship-year.
async fn seed_compliance(db: &DatabaseConnection, calculations: &[ComplianceCalculation]) {
    let mut inserted = 0;

    for calculation in calculations {
        let row = ship_compliance::ActiveModel {
            id: Set(uuid::Uuid::now_v7()),
            ship_id: Set(calculation.ship_id.as_str().to_string()),
            year: Set(calculation.year),
            vessel_type: Set(calculation.vessel_type.clone()),
            target_intensity: Set(calculation.target_intensity),
            actual_intensity: Set(calculation.actual_intensity),
            fuel_consumption: Set(calculation.fuel_consumption),
            energy_in_scope: Set(calculation.energy_in_scope),
            cb_gco2eq: Set(calculation.cb),
            created_at: Set(Utc::now().into()),
        };

        if let Err(e) = row.insert(db).await {
            // Ignore duplicate key errors (ship-year already seeded)
            if !e.to_string().contains("duplicate key") {
                eprintln!("Failed to insert compliance for {}: {e}", calculation.ship_id);
            }
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} compliance balances");
}
