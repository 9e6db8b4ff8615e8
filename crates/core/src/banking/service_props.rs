//! Property-based tests for BankingService.
//!
//! - Ledger non-negativity under arbitrary deposit/withdraw sequences
//! - Replay consistency across interleaved ships
//! - Withdrawal arithmetic

use std::sync::Arc;

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use fueleu_shared::{RouteId, ShipId};

use super::error::BankingError;
use super::service::{ApplyRequest, BankRequest, BankingService};
use crate::compliance::types::ShipYearRecord;
use crate::store::{InMemoryFleet, InMemoryLedger, LedgerStore};

const SHIPS: [&str; 3] = ["IMO9000001", "IMO9000002", "IMO9000003"];

/// One banking call in a generated sequence.
#[derive(Debug, Clone)]
enum Op {
    Bank { ship: usize, amount: Decimal },
    Apply { ship: usize, amount: Decimal },
}

/// Amounts in cents, including zero and negatives to exercise rejection.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000i64..50_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..SHIPS.len(), amount_strategy()).prop_map(|(ship, amount)| Op::Bank { ship, amount }),
        (0..SHIPS.len(), amount_strategy()).prop_map(|(ship, amount)| Op::Apply { ship, amount }),
    ]
}

fn fleet() -> InMemoryFleet {
    let routes = SHIPS
        .iter()
        .map(|ship| ShipYearRecord {
            id: RouteId::new(),
            ship_id: ShipId::parse(ship).unwrap(),
            year: 2024,
            vessel_type: "Tanker".to_string(),
            fuel_type: "LNG".to_string(),
            ghg_intensity: Decimal::new(8_850, 2),
            fuel_consumption: Decimal::from(4_800),
            distance: Decimal::from(11_500),
            total_emissions: Decimal::from(4_200),
            is_baseline: false,
        })
        .collect();
    InMemoryFleet::new(routes, Vec::new())
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// *For any* sequence of calls, every ship's balance stays >= 0, equals
    /// the sum of its entries, and matches a model that only counts accepted
    /// calls.
    #[test]
    fn prop_balance_never_negative_and_matches_model(
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        runtime().block_on(async {
            let ledger = Arc::new(InMemoryLedger::new());
            let service = BankingService::new(ledger.clone(), Arc::new(fleet()));
            let mut model = [Decimal::ZERO; SHIPS.len()];

            for op in &ops {
                match *op {
                    Op::Bank { ship, amount } => {
                        let result = service
                            .bank_surplus(BankRequest {
                                ship_id: SHIPS[ship].to_string(),
                                year: 2024,
                                amount,
                            })
                            .await;
                        if amount > Decimal::ZERO {
                            prop_assert!(result.is_ok());
                            model[ship] += amount;
                        } else {
                            prop_assert!(matches!(result, Err(BankingError::InvalidAmount(_))));
                        }
                    }
                    Op::Apply { ship, amount } => {
                        let result = service
                            .apply_banked(ApplyRequest {
                                ship_id: SHIPS[ship].to_string(),
                                year: 2025,
                                apply_amount: amount,
                            })
                            .await;
                        if amount <= Decimal::ZERO {
                            prop_assert!(matches!(result, Err(BankingError::InvalidAmount(_))));
                        } else if amount > model[ship] {
                            prop_assert!(
                                matches!(result, Err(BankingError::InsufficientBalance { .. })),
                                "withdrawal above balance must be rejected"
                            );
                        } else {
                            let applied = result.unwrap();
                            prop_assert_eq!(applied.cb_before, model[ship]);
                            prop_assert_eq!(applied.applied, amount);
                            prop_assert_eq!(applied.cb_after, applied.cb_before - applied.applied);
                            model[ship] -= amount;
                        }
                    }
                }

                for (i, ship) in SHIPS.iter().enumerate() {
                    let total = service.total_banked(ship).await.unwrap();
                    prop_assert!(total >= Decimal::ZERO);
                    prop_assert_eq!(total, model[i]);
                }
            }

            for ship in SHIPS {
                let ship_id = ShipId::parse(ship).unwrap();
                let entries = ledger.entries(&ship_id).await.unwrap();
                let sum: Decimal = entries.iter().map(|entry| entry.amount).sum();
                prop_assert_eq!(sum, service.total_banked(ship).await.unwrap());
                prop_assert!(entries.iter().all(|entry| entry.ship_id == ship_id));
                prop_assert!(entries.iter().all(|entry| entry.created_at <= Utc::now()));
                prop_assert!(service.ledger_report(ship).await.is_ok());
            }

            Ok(())
        })?;
    }
}
