//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use hydra_exchange::prelude::*;
//! ```

pub use crate::domain::{Address, Amount, PoolEvent, RegistryEvent, Reserves, Shares, Withdrawal};

pub use crate::traits::AssetLedger;

pub use crate::math::CheckedArithmetic;

pub use crate::config::{DepositPolicy, PoolConfig, RegistryConfig, ReverseLookups, WithdrawalCheck};

pub use crate::error::{ExchangeError, LedgerError, Result};

pub use crate::factory::PoolRegistry;

pub use crate::ledger::InMemoryLedger;

pub use crate::pools::LiquidityPool;
