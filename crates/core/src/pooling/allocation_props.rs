//! Property-based tests for pool allocation.
//!
//! - Conservation of total CB
//! - Determinism regardless of member order
//! - Zero-CB members untouched
//! - Members never cross zero

use proptest::prelude::*;
use rust_decimal::Decimal;

use fueleu_shared::ShipId;

use super::allocation::{allocate, plan_transfers};
use super::types::PoolMember;

/// CB values in grams with two decimals, biased to include zero.
fn cb_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1 => Just(Decimal::ZERO),
        6 => (-5_000_000i64..5_000_000i64).prop_map(|v| Decimal::new(v, 2)),
    ]
}

/// Members with distinct ship ids; small value ranges make ties likely.
fn members_strategy() -> impl Strategy<Value = Vec<PoolMember>> {
    prop::collection::vec(
        prop_oneof![cb_strategy(), (-3i64..=3i64).prop_map(Decimal::from)],
        0..40,
    )
    .prop_map(|cbs| {
        cbs.into_iter()
            .enumerate()
            .map(|(i, cb_before)| PoolMember {
                ship_id: ShipId::parse(&format!("IMO{:07}", 9_000_000 + i)).unwrap(),
                vessel_type: "Container".to_string(),
                cb_before,
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* pool, the sum of `cb_after` equals the sum of `cb_before`.
    #[test]
    fn prop_total_cb_conserved(members in members_strategy()) {
        let adjusted = allocate(&members);
        let before: Decimal = members.iter().map(|m| m.cb_before).sum();
        let after: Decimal = adjusted.iter().map(|m| m.cb_after).sum();
        prop_assert_eq!(before, after);
        prop_assert_eq!(adjusted.len(), members.len());
    }

    /// *For any* permutation of the same members, allocation is identical.
    #[test]
    fn prop_order_independent(
        (members, shuffled) in members_strategy()
            .prop_flat_map(|m| (Just(m.clone()), Just(m).prop_shuffle())),
    ) {
        prop_assert_eq!(allocate(&members), allocate(&shuffled));
    }

    /// *For any* pool, members with zero CB keep zero CB.
    #[test]
    fn prop_zero_members_untouched(members in members_strategy()) {
        for member in allocate(&members) {
            if member.cb_before.is_zero() {
                prop_assert!(member.cb_after.is_zero());
            }
        }
    }

    /// *For any* pool, surplus members end in [0, cb_before] and deficit
    /// members end in [cb_before, 0].
    #[test]
    fn prop_no_member_crosses_zero(members in members_strategy()) {
        for member in allocate(&members) {
            if member.cb_before > Decimal::ZERO {
                prop_assert!(member.cb_after >= Decimal::ZERO);
                prop_assert!(member.cb_after <= member.cb_before);
            } else if member.cb_before < Decimal::ZERO {
                prop_assert!(member.cb_after <= Decimal::ZERO);
                prop_assert!(member.cb_after >= member.cb_before);
            }
        }
    }

    /// *For any* pool, the sweep runs until one side is exhausted: surplus
    /// and deficit never both remain.
    #[test]
    fn prop_sweep_exhausts_one_side(members in members_strategy()) {
        let adjusted = allocate(&members);
        let surplus_left = adjusted.iter().any(|m| m.cb_after > Decimal::ZERO);
        let deficit_left = adjusted.iter().any(|m| m.cb_after < Decimal::ZERO);
        prop_assert!(!(surplus_left && deficit_left));
    }

    /// *For any* pool, every transfer is positive and the count is bounded by
    /// the number of non-zero members.
    #[test]
    fn prop_transfers_positive_and_bounded(members in members_strategy()) {
        let transfers = plan_transfers(&members);
        let non_zero = members.iter().filter(|m| !m.cb_before.is_zero()).count();
        prop_assert!(transfers.iter().all(|t| t.amount > Decimal::ZERO));
        prop_assert!(transfers.len() <= non_zero.saturating_sub(1));
    }

    /// *For any* pool, output is sorted by ship id.
    #[test]
    fn prop_output_sorted_by_ship(members in members_strategy()) {
        let adjusted = allocate(&members);
        prop_assert!(adjusted.windows(2).all(|w| w[0].ship_id < w[1].ship_id));
    }
}
