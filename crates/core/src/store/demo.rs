//! Demonstration fleet used by the seeder and the in-memory backend.
//!
//! Five ship-year records across 2024 and 2025. Compliance balances derive
//! from the record as `(target - actual) * fuel * energy_per_tonne`.

use rust_decimal::Decimal;

use fueleu_shared::types::{RouteId, ShipId};

use crate::compliance::types::{ComplianceCalculation, ShipYearRecord};

/// 2025 GHG intensity target in gCO₂e/MJ (2% below 91.16).
pub const TARGET_INTENSITY: Decimal = Decimal::from_parts(893_368, 0, 0, false, 4);

/// Lower calorific value of marine fuel in MJ per tonne.
pub const ENERGY_PER_TONNE: Decimal = Decimal::from_parts(41_000, 0, 0, false, 0);

/// Raw rows: ship, year, vessel, fuel, intensity (x10), consumption, distance, emissions.
const ROWS: [(&str, i32, &str, &str, i64, i64, i64, i64); 5] = [
    ("R001", 2024, "Container", "HFO", 910, 5000, 12_000, 4500),
    ("R002", 2024, "BulkCarrier", "LNG", 880, 4800, 11_500, 4200),
    ("R003", 2024, "Tanker", "MGO", 935, 5100, 12_500, 4700),
    ("R004", 2025, "RoRo", "HFO", 892, 4900, 11_800, 4300),
    ("R005", 2025, "Container", "LNG", 905, 4950, 11_900, 4400),
];

/// Route records of the demonstration fleet; R001 is the baseline.
#[must_use]
pub fn demo_routes() -> Vec<ShipYearRecord> {
    ROWS.iter()
        .filter_map(
            |&(ship, year, vessel, fuel, intensity, consumption, distance, emissions)| {
                Some(ShipYearRecord {
                    id: RouteId::new(),
                    ship_id: ShipId::parse(ship).ok()?,
                    year,
                    vessel_type: vessel.to_string(),
                    fuel_type: fuel.to_string(),
                    ghg_intensity: Decimal::new(intensity, 1),
                    fuel_consumption: Decimal::from(consumption),
                    distance: Decimal::from(distance),
                    total_emissions: Decimal::from(emissions),
                    is_baseline: ship == "R001",
                })
            },
        )
        .collect()
}

/// Compliance balance of one record against [`TARGET_INTENSITY`].
#[must_use]
pub fn calculate(record: &ShipYearRecord) -> ComplianceCalculation {
    let energy_in_scope = record.fuel_consumption * ENERGY_PER_TONNE;
    ComplianceCalculation {
        ship_id: record.ship_id.clone(),
        year: record.year,
        vessel_type: record.vessel_type.clone(),
        target_intensity: TARGET_INTENSITY,
        actual_intensity: record.ghg_intensity,
        fuel_consumption: record.fuel_consumption,
        energy_in_scope,
        cb: (TARGET_INTENSITY - record.ghg_intensity) * energy_in_scope,
    }
}

/// Records and calculations of the demonstration fleet.
#[must_use]
pub fn demo_fleet() -> (Vec<ShipYearRecord>, Vec<ComplianceCalculation>) {
    let routes = demo_routes();
    let compliance = routes.iter().map(calculate).collect();
    (routes, compliance)
}
