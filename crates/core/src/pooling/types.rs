//! Pool members and results.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fueleu_shared::ShipId;

use crate::compliance::types::ComplianceCalculation;

/// Request to form a pool.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePoolRequest {
    /// Compliance year of the pool.
    pub year: i32,
    /// Member ship identifiers; duplicates collapse.
    pub members: Vec<String>,
}

/// Allocation input for one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolMember {
    /// The ship.
    pub ship_id: ShipId,
    /// Vessel type, carried to the result.
    pub vessel_type: String,
    /// Compliance balance before pooling.
    pub cb_before: Decimal,
}

impl From<ComplianceCalculation> for PoolMember {
    fn from(calculation: ComplianceCalculation) -> Self {
        Self {
            ship_id: calculation.ship_id,
            vessel_type: calculation.vessel_type,
            cb_before: calculation.cb,
        }
    }
}

/// A member's compliance balance before and after pooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjustedCb {
    /// The ship.
    #[serde(rename = "shipId")]
    pub ship_id: ShipId,
    /// Vessel type.
    #[serde(rename = "vesselType")]
    pub vessel_type: String,
    /// Compliance balance before pooling.
    pub cb_before: Decimal,
    /// Compliance balance after pooling.
    pub cb_after: Decimal,
}

/// Result of a pool allocation. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pool {
    /// Compliance year.
    pub year: i32,
    /// Members ordered by ship id.
    pub members: Vec<AdjustedCb>,
}

impl Pool {
    /// Sum of `cb_before` over all members.
    #[must_use]
    pub fn total_before(&self) -> Decimal {
        self.members.iter().map(|member| member.cb_before).sum()
    }

    /// Sum of `cb_after` over all members; always equals [`Self::total_before`].
    #[must_use]
    pub fn total_after(&self) -> Decimal {
        self.members.iter().map(|member| member.cb_after).sum()
    }

    /// Members still in deficit after pooling.
    pub fn remaining_deficits(&self) -> impl Iterator<Item = &AdjustedCb> {
        self.members
            .iter()
            .filter(|member| member.cb_after < Decimal::ZERO)
    }
}
