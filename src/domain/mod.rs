//! Fundamental domain value types used throughout the exchange.
//!
//! Identities, amounts, shares, reserve snapshots and events.  All types
//! are small `Copy` newtypes or plain records; behaviour lives in
//! [`pools`](crate::pools) and [`factory`](crate::factory).

mod address;
mod amount;
mod event;
mod reserves;
mod share_ledger;
mod shares;

pub use address::{Address, ParseAddressError};
pub use amount::Amount;
pub use event::{PoolEvent, RegistryEvent};
pub use reserves::{Reserves, Withdrawal};
pub use share_ledger::ShareLedger;
pub use shares::Shares;
