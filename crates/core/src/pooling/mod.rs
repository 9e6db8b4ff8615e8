//! Compliance pooling.
//!
//! A pool redistributes CB among ships of the same year so surplus from some
//! members offsets deficits of others. Allocation is a pure function over the
//! members' balances; the service resolves those balances from the compliance
//! provider.

pub mod allocation;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod allocation_props;

pub use allocation::{Transfer, allocate, plan_transfers};
pub use error::PoolError;
pub use service::PoolService;
pub use types::{AdjustedCb, CreatePoolRequest, Pool, PoolMember};
