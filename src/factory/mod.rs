//! Pool creation and lookup.
//!
//! The [`PoolRegistry`] owns every pool it creates, enforces one pool per
//! asset, and hands each new pool the registry's shared
//! [`AssetLedger`](crate::traits::AssetLedger) and policies.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use hydra_exchange::config::RegistryConfig;
//! use hydra_exchange::domain::{Address, Amount};
//! use hydra_exchange::factory::PoolRegistry;
//! use hydra_exchange::ledger::InMemoryLedger;
//!
//! let ledger = Arc::new(InMemoryLedger::new());
//! let registry = PoolRegistry::new(
//!     RegistryConfig::new(Address::from_bytes([9u8; 32])).expect("valid"),
//!     ledger.clone(),
//! );
//!
//! let asset = Address::from_bytes([1u8; 32]);
//! let pool_addr = registry.create_pool(asset).expect("created");
//! let pool = registry.pool_for_asset(&asset).expect("readable").expect("exists");
//!
//! let lp = Address::from_bytes([3u8; 32]);
//! ledger.mint(&lp, Amount::new(10_000)).expect("mint");
//! ledger.approve(&lp, &pool_addr, Amount::new(10_000)).expect("approve");
//! pool.deposit_liquidity(lp, Amount::new(10), Amount::new(10_000)).expect("deposit");
//! assert_eq!(pool.quote_asset_for_native(Amount::new(1)), Ok(Amount::new(906)));
//! ```

mod pool_registry;

pub use pool_registry::PoolRegistry;
