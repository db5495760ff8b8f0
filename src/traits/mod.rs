//! Seams to external collaborators.
//!
//! [`AssetLedger`] is the only trait the exchange depends on: pools read
//! their asset reserve from it and move the asset through it.

mod asset_ledger;

pub use asset_ledger::AssetLedger;
