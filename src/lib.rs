//! # Hydra Exchange
//!
//! Constant-product exchange pools that trade a host's native value
//! against fungible assets, plus a registry that keeps exactly one pool per
//! asset.
//!
//! Each pool prices trades with the `x · y = k` rule and a 0.3% fee,
//! mints fungible shares to liquidity providers, and keeps its asset
//! reserve on an external [`AssetLedger`](traits::AssetLedger).  All
//! arithmetic is integer-only and checked.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use hydra_exchange::prelude::*;
//!
//! // 1. A ledger for the traded asset, with one funded provider
//! let ledger = Arc::new(InMemoryLedger::new());
//! let lp = Address::from_bytes([3u8; 32]);
//! ledger.mint(&lp, Amount::new(1_000_000)).expect("mint");
//!
//! // 2. A registry and one pool
//! let registry = PoolRegistry::new(
//!     RegistryConfig::new(Address::from_bytes([9u8; 32])).expect("valid config"),
//!     ledger.clone(),
//! );
//! let asset = Address::from_bytes([1u8; 32]);
//! let pool_addr = registry.create_pool(asset).expect("created");
//! let pool = registry.pool_for_asset(&asset).expect("readable").expect("exists");
//!
//! // 3. Seed liquidity: 10 native against 10 000 asset units
//! ledger.approve(&lp, &pool_addr, Amount::new(10_000)).expect("approve");
//! let shares = pool
//!     .deposit_liquidity(lp, Amount::new(10), Amount::new(10_000))
//!     .expect("deposit");
//! assert_eq!(shares, Shares::new(10));
//!
//! // 4. Buy the asset with 1 native unit
//! let trader = Address::from_bytes([4u8; 32]);
//! let out = pool
//!     .swap_native_for_asset(trader, Amount::new(1), Amount::new(900), trader)
//!     .expect("swap");
//! assert_eq!(out, Amount::new(906));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ PoolRegistry │  one pool per asset, derived addresses
//! └──────┬───────┘
//!        │ create_pool(asset)
//!        ▼
//! ┌──────────────┐
//! │LiquidityPool │  reserves, shares, swaps, events
//! └──┬────────┬──┘
//!    │        │ transfer / transfer_from
//!    ▼        ▼
//! ┌──────┐ ┌─────────────┐
//! │ math │ │ AssetLedger │
//! └──────┘ └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Address`](domain::Address), [`Amount`](domain::Amount), [`Shares`](domain::Shares), events |
//! | [`math`]   | Checked arithmetic and constant-product pricing |
//! | [`config`] | [`PoolConfig`](config::PoolConfig), [`RegistryConfig`](config::RegistryConfig) and policies |
//! | [`traits`] | The [`AssetLedger`](traits::AssetLedger) seam |
//! | [`ledger`] | [`InMemoryLedger`](ledger::InMemoryLedger) reference ledger |
//! | [`pools`]  | [`LiquidityPool`](pools::LiquidityPool) |
//! | [`factory`] | [`PoolRegistry`](factory::PoolRegistry) |
//! | [`error`]  | [`ExchangeError`](error::ExchangeError) and [`LedgerError`](error::LedgerError) |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
