//! Native/asset exchange pools.
//!
//! A [`LiquidityPool`] pairs the host's native value with one fungible
//! asset held on an [`AssetLedger`](crate::traits::AssetLedger).  Pools
//! are created and indexed by the
//! [`PoolRegistry`](crate::factory::PoolRegistry); they can also be built
//! directly from a [`PoolConfig`](crate::config::PoolConfig).
//!
//! # Concurrency
//!
//! | Access | Lock |
//! |--------|------|
//! | quotes, reserves, balances | shared read lock |
//! | deposits, withdrawals, swaps, share ops | exclusive write lock |
//!
//! A call back into a pool from inside one of its own mutations fails
//! with [`ExchangeError::Reentrancy`](crate::error::ExchangeError::Reentrancy).

mod guard;
mod liquidity_pool;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use liquidity_pool::LiquidityPool;
