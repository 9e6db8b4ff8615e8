//! Greedy redistribution of compliance balance inside a pool.
//!
//! Surplus members are ordered by descending CB and deficit members by
//! ascending CB (most negative first), ties broken by ascending ship id. Two
//! cursors then walk both lists, each step moving
//! `min(remaining surplus, remaining |deficit|)` from the current surplus
//! member to the current deficit member. The sweep stops when either list is
//! exhausted.
//!
//! This is first-fit matching, not an optimal redistribution: O(n log n) for
//! the sorts and O(n) for the sweep, and fully deterministic.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use super::types::{AdjustedCb, PoolMember};

/// A single movement of CB between two members, by index into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    /// Index of the surplus member giving CB.
    pub from: usize,
    /// Index of the deficit member receiving CB.
    pub to: usize,
    /// Amount moved; always positive.
    pub amount: Decimal,
}

/// Two-cursor state machine over the ordered surplus and deficit lists.
#[derive(Debug)]
struct Sweep<'a> {
    members: &'a [PoolMember],
    surplus: Vec<usize>,
    deficit: Vec<usize>,
    surplus_cursor: usize,
    deficit_cursor: usize,
    surplus_left: Decimal,
    deficit_left: Decimal,
}

impl<'a> Sweep<'a> {
    fn new(members: &'a [PoolMember]) -> Self {
        let mut surplus: Vec<usize> = (0..members.len())
            .filter(|&i| members[i].cb_before > Decimal::ZERO)
            .collect();
        let mut deficit: Vec<usize> = (0..members.len())
            .filter(|&i| members[i].cb_before < Decimal::ZERO)
            .collect();

        surplus.sort_by(|&a, &b| {
            members[b]
                .cb_before
                .cmp(&members[a].cb_before)
                .then_with(|| by_ship(members, a, b))
        });
        deficit.sort_by(|&a, &b| {
            members[a]
                .cb_before
                .cmp(&members[b].cb_before)
                .then_with(|| by_ship(members, a, b))
        });

        let surplus_left = surplus
            .first()
            .map_or(Decimal::ZERO, |&i| members[i].cb_before);
        let deficit_left = deficit
            .first()
            .map_or(Decimal::ZERO, |&i| -members[i].cb_before);

        Self {
            members,
            surplus,
            deficit,
            surplus_cursor: 0,
            deficit_cursor: 0,
            surplus_left,
            deficit_left,
        }
    }

    fn advance_surplus(&mut self) {
        self.surplus_cursor += 1;
        self.surplus_left = self
            .surplus
            .get(self.surplus_cursor)
            .map_or(Decimal::ZERO, |&i| self.members[i].cb_before);
    }

    fn advance_deficit(&mut self) {
        self.deficit_cursor += 1;
        self.deficit_left = self
            .deficit
            .get(self.deficit_cursor)
            .map_or(Decimal::ZERO, |&i| -self.members[i].cb_before);
    }
}

impl Iterator for Sweep<'_> {
    type Item = Transfer;

    fn next(&mut self) -> Option<Transfer> {
        let from = *self.surplus.get(self.surplus_cursor)?;
        let to = *self.deficit.get(self.deficit_cursor)?;

        let amount = self.surplus_left.min(self.deficit_left);
        self.surplus_left -= amount;
        self.deficit_left -= amount;

        if self.surplus_left.is_zero() {
            self.advance_surplus();
        }
        if self.deficit_left.is_zero() {
            self.advance_deficit();
        }

        Some(Transfer { from, to, amount })
    }
}

fn by_ship(members: &[PoolMember], a: usize, b: usize) -> Ordering {
    members[a].ship_id.cmp(&members[b].ship_id)
}

/// Lists the transfers the greedy sweep performs, in order.
#[must_use]
pub fn plan_transfers(members: &[PoolMember]) -> Vec<Transfer> {
    Sweep::new(members).collect()
}

/// Redistributes CB among `members`.
///
/// Returns one [`AdjustedCb`] per member, ordered by ship id. Members with
/// zero CB, and any surplus or deficit the sweep never reaches, keep
/// `cb_after == cb_before`. The sum of `cb_after` always equals the sum of
/// `cb_before`.
#[must_use]
pub fn allocate(members: &[PoolMember]) -> Vec<AdjustedCb> {
    let mut cb_after: Vec<Decimal> = members.iter().map(|member| member.cb_before).collect();

    for transfer in Sweep::new(members) {
        cb_after[transfer.from] -= transfer.amount;
        cb_after[transfer.to] += transfer.amount;
    }

    let mut adjusted: Vec<AdjustedCb> = members
        .iter()
        .zip(cb_after)
        .map(|(member, cb_after)| AdjustedCb {
            ship_id: member.ship_id.clone(),
            vessel_type: member.vessel_type.clone(),
            cb_before: member.cb_before,
            cb_after,
        })
        .collect();
    adjusted.sort_by(|a, b| a.ship_id.cmp(&b.ship_id));
    adjusted
}
