//! Ship-year records and their compliance calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fueleu_shared::types::{RouteId, ShipId};

/// One voyage record per (ship, year) as supplied by the route provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipYearRecord {
    /// Record identifier.
    pub id: RouteId,
    /// Ship the record belongs to.
    pub ship_id: ShipId,
    /// Reporting year.
    pub year: i32,
    /// Vessel type (e.g. "Container", "Tanker").
    pub vessel_type: String,
    /// Primary fuel (e.g. "HFO", "LNG").
    pub fuel_type: String,
    /// GHG intensity in gCO₂e/MJ.
    pub ghg_intensity: Decimal,
    /// Fuel consumption in tonnes.
    pub fuel_consumption: Decimal,
    /// Distance sailed in km.
    pub distance: Decimal,
    /// Total emissions in tonnes CO₂e.
    pub total_emissions: Decimal,
    /// Whether this record is the comparison baseline for its ship.
    pub is_baseline: bool,
}

/// Compliance balance for a ship-year, computed upstream.
///
/// The core treats `cb` as an opaque signed input: positive is surplus,
/// negative is deficit, in gCO₂e.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceCalculation {
    /// Ship the balance belongs to.
    pub ship_id: ShipId,
    /// Reporting year.
    pub year: i32,
    /// Vessel type carried through to pool results.
    pub vessel_type: String,
    /// Target GHG intensity for the year in gCO₂e/MJ.
    pub target_intensity: Decimal,
    /// Actual GHG intensity in gCO₂e/MJ.
    pub actual_intensity: Decimal,
    /// Fuel consumption in tonnes.
    pub fuel_consumption: Decimal,
    /// Energy in scope in MJ.
    pub energy_in_scope: Decimal,
    /// Compliance balance in gCO₂e.
    pub cb: Decimal,
}

impl ComplianceCalculation {
    /// Returns true when the ship-year carries surplus.
    #[must_use]
    pub fn is_surplus(&self) -> bool {
        self.cb > Decimal::ZERO
    }

    /// Returns true when the ship-year carries a deficit.
    #[must_use]
    pub fn is_deficit(&self) -> bool {
        self.cb < Decimal::ZERO
    }
}
