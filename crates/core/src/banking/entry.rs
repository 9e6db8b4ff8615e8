//! Banking ledger entries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fueleu_shared::types::{BankEntryId, ShipId};

/// Decimal places an amount may carry (`NUMERIC(28, 4)` in storage).
pub const AMOUNT_SCALE: u32 = 4;

/// Largest amount a single entry may carry: 24 integer and 4 fractional digits.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0x0FFF_FFFF, 0x3E25_0261, 0x204F_CE5E, false, 4);

/// Immutable row of the banking ledger.
///
/// Entries are never edited or removed. A ship's banked balance is the sum of
/// its entries in commit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankEntry {
    /// Entry identifier.
    pub id: BankEntryId,
    /// Ship the entry belongs to.
    pub ship_id: ShipId,
    /// Compliance year the entry was booked against.
    pub year: i32,
    /// Signed amount in gCO₂e; positive deposits, negative withdrawals.
    pub amount: Decimal,
    /// Commit timestamp; ledger order key.
    pub created_at: DateTime<Utc>,
}

/// Entry to append, before the store assigns identity and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBankEntry {
    /// Ship the entry belongs to.
    pub ship_id: ShipId,
    /// Compliance year.
    pub year: i32,
    /// Signed amount in gCO₂e.
    pub amount: Decimal,
}

impl NewBankEntry {
    /// A deposit of `amount`.
    #[must_use]
    pub fn deposit(ship_id: ShipId, year: i32, amount: Decimal) -> Self {
        Self {
            ship_id,
            year,
            amount,
        }
    }

    /// A withdrawal of `amount`, stored as `-amount`.
    #[must_use]
    pub fn withdrawal(ship_id: ShipId, year: i32, amount: Decimal) -> Self {
        Self {
            ship_id,
            year,
            amount: -amount,
        }
    }

    /// Stamps the entry with a fresh identifier and the given commit time.
    #[must_use]
    pub fn into_entry(self, created_at: DateTime<Utc>) -> BankEntry {
        BankEntry {
            id: BankEntryId::new(),
            ship_id: self.ship_id,
            year: self.year,
            amount: self.amount,
            created_at,
        }
    }
}
