//! Property-based tests using `proptest` for pool invariants.
//!
//! 1. **Quote bounds**: output is below the output reserve and grows with
//!    the input.
//! 2. **Product preservation**: `native × asset` never decreases across
//!    swaps.
//! 3. **Liquidity conservation**: deposit then withdraw returns at most
//!    what was put in.
//! 4. **Proportional minting**: a ratio-matched deposit mints shares in
//!    proportion to the native contribution.
//! 5. **Slippage atomicity**: a rejected swap leaves the pool untouched.

use std::sync::Arc;

use proptest::prelude::*;

use super::LiquidityPool;
use crate::config::PoolConfig;
use crate::domain::{Address, Amount, Reserves, Shares};
use crate::error::ExchangeError;
use crate::ledger::InMemoryLedger;
use crate::math::quote_output;
use crate::traits::AssetLedger;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const FUNDING: u128 = 1_000_000_000_000;

fn pool_addr() -> Address {
    Address::from_bytes([2u8; 32])
}

fn provider() -> Address {
    Address::from_bytes([3u8; 32])
}

fn trader() -> Address {
    Address::from_bytes([4u8; 32])
}

fn make_pool(native: u128, asset: u128) -> (Arc<InMemoryLedger>, LiquidityPool) {
    let ledger = Arc::new(InMemoryLedger::new());
    for who in [provider(), trader()] {
        let Ok(()) = ledger.mint(&who, Amount::new(FUNDING)) else {
            panic!("mint");
        };
        let Ok(()) = ledger.approve(&who, &pool_addr(), Amount::MAX) else {
            panic!("approve");
        };
    }
    let Ok(cfg) = PoolConfig::new(Address::from_bytes([1u8; 32]), provider(), pool_addr()) else {
        panic!("valid config");
    };
    let Ok(pool) = LiquidityPool::new(cfg, ledger.clone()) else {
        panic!("valid pool");
    };
    let Ok(_) = pool.deposit_liquidity(provider(), Amount::new(native), Amount::new(asset)) else {
        panic!("seed deposit");
    };
    (ledger, pool)
}

fn snapshot(pool: &LiquidityPool) -> Reserves {
    let Ok(r) = pool.reserves() else {
        panic!("reserves");
    };
    r
}

fn product(r: Reserves) -> u128 {
    let Some(k) = r.product() else {
        panic!("product overflow");
    };
    k
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in [10_000, 10_000_000].
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

/// Trade sizes in [1, 1_000_000].
fn trade_strategy() -> impl Strategy<Value = u128> {
    1u128..=1_000_000u128
}

// ---------------------------------------------------------------------------
// Property 1: Quote bounds
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_quote_below_reserve_and_monotonic(
        ri in reserve_strategy(),
        ro in reserve_strategy(),
        a in trade_strategy(),
        b in trade_strategy(),
    ) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let Ok(q_small) = quote_output(Amount::new(small), Amount::new(ri), Amount::new(ro)) else {
            return Err(TestCaseError::fail("quote failed"));
        };
        let Ok(q_large) = quote_output(Amount::new(large), Amount::new(ri), Amount::new(ro)) else {
            return Err(TestCaseError::fail("quote failed"));
        };
        prop_assert!(q_large.get() < ro);
        prop_assert!(q_small <= q_large);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Product preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_product_never_decreases(
        native in reserve_strategy(),
        asset in reserve_strategy(),
        trades in prop::collection::vec((any::<bool>(), trade_strategy()), 1..8),
    ) {
        let (_, pool) = make_pool(native, asset);
        let mut k = product(snapshot(&pool));

        for (buy, size) in trades {
            let result = if buy {
                pool.swap_native_for_asset(trader(), Amount::new(size), Amount::ZERO, trader())
            } else {
                pool.swap_asset_for_native(trader(), Amount::new(size), Amount::ZERO)
            };
            prop_assert!(result.is_ok(), "swap failed: {:?}", result);
            let next = product(snapshot(&pool));
            prop_assert!(next >= k, "product fell from {} to {}", k, next);
            k = next;
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Liquidity conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deposit_then_withdraw_never_profits(
        native in reserve_strategy(),
        asset in reserve_strategy(),
        swap in trade_strategy(),
        add in reserve_strategy(),
    ) {
        let (_, pool) = make_pool(native, asset);
        let Ok(_) = pool.swap_native_for_asset(trader(), Amount::new(swap), Amount::ZERO, trader()) else {
            return Err(TestCaseError::fail("swap failed"));
        };

        let before = snapshot(&pool);
        // asset rounded up so the deposit is never below the reserve ratio
        let asset_in = (add * before.asset.get()).div_ceil(before.native.get());
        let Ok(minted) = pool.deposit_liquidity(trader(), Amount::new(add), Amount::new(asset_in)) else {
            return Ok(());
        };
        let Ok(out) = pool.withdraw_liquidity(trader(), minted) else {
            return Err(TestCaseError::fail("withdraw failed"));
        };
        prop_assert!(out.native_out.get() <= add);
        prop_assert!(out.asset_out.get() <= asset_in);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Proportional minting
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_minting_tracks_native_share(
        native in reserve_strategy(),
        asset in reserve_strategy(),
        add in reserve_strategy(),
    ) {
        let (_, pool) = make_pool(native, asset);
        let asset_in = (add * asset).div_ceil(native);
        let Ok(minted) = pool.deposit_liquidity(trader(), Amount::new(add), Amount::new(asset_in)) else {
            return Err(TestCaseError::fail("deposit failed"));
        };
        // seed deposit minted `native` shares, so the ratio is exact
        prop_assert_eq!(minted, Shares::new(add));
        let total = snapshot(&pool).total_shares.get();
        prop_assert_eq!(total, native + add);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Slippage atomicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_slippage_rejection_is_atomic(
        native in reserve_strategy(),
        asset in reserve_strategy(),
        size in trade_strategy(),
        extra in 1u128..=1_000u128,
    ) {
        let (ledger, pool) = make_pool(native, asset);
        let before = snapshot(&pool);
        let events_before = pool.events().map(|e| e.len());
        let Ok(balance_before) = ledger.balance_of(&trader()) else {
            return Err(TestCaseError::fail("balance"));
        };

        let Ok(quoted) = pool.quote_asset_for_native(Amount::new(size)) else {
            return Err(TestCaseError::fail("quote failed"));
        };
        let minimum = Amount::new(quoted.get() + extra);
        let result = pool.swap_native_for_asset(trader(), Amount::new(size), minimum, trader());
        prop_assert_eq!(
            result,
            Err(ExchangeError::SlippageExceeded { minimum, actual: quoted })
        );
        prop_assert_eq!(snapshot(&pool), before);
        prop_assert_eq!(pool.events().map(|e| e.len()), events_before);
        prop_assert_eq!(
            ledger.balance_of(&trader()),
            Ok(balance_before)
        );
    }
}
