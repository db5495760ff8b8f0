//! Walk-through of a registry, one pool, and a few trades.
//!
//! ```sh
//! RUST_LOG=hydra_exchange=debug cargo run --example exchange
//! ```

use std::sync::Arc;

use hydra_exchange::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hydra_exchange=info")),
        )
        .init();

    let ledger = Arc::new(InMemoryLedger::new());
    let registry = PoolRegistry::new(
        RegistryConfig::new(Address::from_bytes([0xAA; 32]))?
            .with_deposit_policy(DepositPolicy::Proportional),
        ledger.clone(),
    );

    let asset: Address = "0x0101010101010101010101010101010101010101010101010101010101010101".parse()?;
    let pool_addr = registry.create_pool(asset)?;
    let pool = registry
        .pool_for_asset(&asset)?
        .ok_or("pool missing after creation")?;
    println!("pool {pool_addr} trades {asset}");

    let lp = Address::from_bytes([0x10; 32]);
    let trader = Address::from_bytes([0x20; 32]);
    for who in [lp, trader] {
        ledger.mint(&who, Amount::new(10_000_000))?;
        ledger.approve(&who, &pool_addr, Amount::MAX)?;
    }

    let shares = pool.deposit_liquidity(lp, Amount::new(1_000_000), Amount::new(2_000_000))?;
    println!("seeded 1_000_000 native / 2_000_000 asset for {shares} shares");

    let quote = pool.quote_asset_for_native(Amount::new(10_000))?;
    let bought = pool.swap_native_for_asset(trader, Amount::new(10_000), quote, trader)?;
    println!("10_000 native bought {bought} asset");

    let needed = pool.quote_asset_for_exact_native(Amount::new(5_000))?;
    let sold = pool.swap_asset_for_native(trader, needed, Amount::new(5_000))?;
    println!("{needed} asset sold for {sold} native");

    match pool.swap_native_for_asset(trader, Amount::new(1), Amount::new(1_000), trader) {
        Err(ExchangeError::SlippageExceeded { minimum, actual }) => {
            println!("slippage guard: wanted {minimum}, pool offered {actual}");
        }
        other => println!("unexpected result: {other:?}"),
    }

    let Withdrawal { native_out, asset_out } = pool.withdraw_liquidity(lp, shares)?;
    println!("withdrew {native_out} native and {asset_out} asset");

    for event in pool.events()? {
        println!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}
