//! Native/asset exchange pool (Uniswap V1 style).
//!
//! One pool pairs the host's native value asset with a single fungible
//! asset.  The native reserve is held by the pool itself; the asset
//! reserve is whatever the ledger reports for the pool's address.
//!
//! # Operation Ordering
//!
//! Every mutation follows the same sequence under the pool's write lock:
//!
//! 1. validate arguments and read reserves,
//! 2. compute all outputs, run every check, and pre-compute every new value,
//! 3. perform the single fallible ledger call,
//! 4. commit native reserve, shares and event.
//!
//! A failure in steps 1 to 3 leaves the pool untouched.  Step 4 cannot
//! fail for values that passed step 2.
//!
//! # Received-then-priced
//!
//! Native payments arrive with the call.  Quotes treat the payment as
//! already credited and price against `balance_after_receipt − input`,
//! which is the reserve the trader actually faced.  The asset side is
//! priced the same way.

use std::fmt;
use std::sync::{Arc, RwLock};

use super::guard::ReentrancyGuard;
use crate::config::{DepositPolicy, PoolConfig, WithdrawalCheck};
use crate::domain::{Address, Amount, PoolEvent, Reserves, ShareLedger, Shares, Withdrawal};
use crate::error::{ExchangeError, Result};
use crate::math::{CheckedArithmetic, mul_div, quote_input, quote_output};
use crate::traits::AssetLedger;

#[derive(Debug, Default)]
struct PoolState {
    native_reserve: Amount,
    shares: ShareLedger,
    events: Vec<PoolEvent>,
}

/// A constant-product pool trading native value against one asset.
///
/// Shareable across threads behind an [`Arc`]; every method takes
/// `&self`.  Mutations are serialised by an internal lock, quotes may run
/// concurrently with each other.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use hydra_exchange::config::PoolConfig;
/// use hydra_exchange::domain::{Address, Amount};
/// use hydra_exchange::ledger::InMemoryLedger;
/// use hydra_exchange::pools::LiquidityPool;
///
/// let asset = Address::from_bytes([1u8; 32]);
/// let pool_addr = Address::from_bytes([2u8; 32]);
/// let alice = Address::from_bytes([3u8; 32]);
///
/// let ledger = Arc::new(InMemoryLedger::new());
/// ledger.mint(&alice, Amount::new(10_000)).expect("mint");
/// ledger.approve(&alice, &pool_addr, Amount::new(10_000)).expect("approve");
///
/// let cfg = PoolConfig::new(asset, alice, pool_addr).expect("valid config");
/// let pool = LiquidityPool::new(cfg, ledger.clone()).expect("pool");
///
/// let shares = pool
///     .deposit_liquidity(alice, Amount::new(10), Amount::new(10_000))
///     .expect("deposit");
/// assert_eq!(shares.get(), 10);
///
/// let out = pool
///     .swap_native_for_asset(alice, Amount::new(1), Amount::new(900), alice)
///     .expect("swap");
/// assert_eq!(out, Amount::new(906));
/// ```
pub struct LiquidityPool {
    config: PoolConfig,
    ledger: Arc<dyn AssetLedger>,
    state: RwLock<PoolState>,
    guard: ReentrancyGuard,
}

impl fmt::Debug for LiquidityPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiquidityPool")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl LiquidityPool {
    /// Creates an empty pool bound to `config.asset()`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PoolConfig::validate`].
    pub fn new(config: PoolConfig, ledger: Arc<dyn AssetLedger>) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            pool = %config.address(),
            asset = %config.asset(),
            creator = %config.creator(),
            "pool initialised"
        );
        Ok(Self {
            config,
            ledger,
            state: RwLock::new(PoolState::default()),
            guard: ReentrancyGuard::default(),
        })
    }

    /// The asset this pool trades.
    #[must_use]
    pub const fn asset(&self) -> Address {
        self.config.asset()
    }

    /// Who instantiated the pool.
    #[must_use]
    pub const fn creator(&self) -> Address {
        self.config.creator()
    }

    /// The pool's own account on the asset ledger.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.config.address()
    }

    /// The configuration the pool was built from.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    // -- locking ------------------------------------------------------------

    fn inspect<T>(&self, op: impl FnOnce(&PoolState) -> Result<T>) -> Result<T> {
        self.guard.check(self.address())?;
        let state = self.state.read().map_err(|_| ExchangeError::LockPoisoned)?;
        op(&state)
    }

    fn mutate<T>(&self, op: impl FnOnce(&mut PoolState) -> Result<T>) -> Result<T> {
        self.guard.check(self.address())?;
        let mut state = self.state.write().map_err(|_| ExchangeError::LockPoisoned)?;
        // released before the write lock
        let _entered = self.guard.enter()?;
        op(&mut state)
    }

    fn ledger_asset_reserve(&self) -> Result<Amount> {
        Ok(self.ledger.balance_of(&self.address())?)
    }

    // -- pricing ------------------------------------------------------------

    fn asset_out_for(native_after_receipt: Amount, native_in: Amount, asset_reserve: Amount) -> Result<Amount> {
        let input_reserve = native_after_receipt.safe_sub(&native_in)?;
        quote_output(native_in, input_reserve, asset_reserve)
    }

    fn native_out_for(asset_after_receipt: Amount, asset_in: Amount, native_reserve: Amount) -> Result<Amount> {
        let input_reserve = asset_after_receipt.safe_sub(&asset_in)?;
        quote_output(asset_in, input_reserve, native_reserve)
    }

    /// Asset paid out for `native_in`, with the payment counted as
    /// received.
    ///
    /// Returns exactly what [`swap_native_for_asset`](Self::swap_native_for_asset)
    /// would pay against the current reserves.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidQuoteInput`] if `native_in` is zero or the
    ///   pool holds no native value.
    /// - [`ExchangeError::Ledger`] if the asset reserve cannot be read.
    pub fn quote_asset_for_native(&self, native_in: Amount) -> Result<Amount> {
        self.inspect(|state| {
            let asset_reserve = self.ledger_asset_reserve()?;
            let received = state.native_reserve.safe_add(&native_in)?;
            let out = Self::asset_out_for(received, native_in, asset_reserve)?;
            tracing::debug!(pool = %self.address(), %native_in, asset_out = %out, "quoted native for asset");
            Ok(out)
        })
    }

    /// Native value paid out for `asset_in`, with the asset counted as
    /// received.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidQuoteInput`] if `asset_in` is zero or the
    ///   pool holds none of the asset.
    /// - [`ExchangeError::Ledger`] if the asset reserve cannot be read.
    pub fn quote_native_for_asset(&self, asset_in: Amount) -> Result<Amount> {
        self.inspect(|state| {
            let received = self.ledger_asset_reserve()?.safe_add(&asset_in)?;
            let out = Self::native_out_for(received, asset_in, state.native_reserve)?;
            tracing::debug!(pool = %self.address(), %asset_in, native_out = %out, "quoted asset for native");
            Ok(out)
        })
    }

    /// Native value required to buy exactly `asset_out`.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::InvalidQuoteInput`] if `asset_out` is zero, a
    /// reserve is empty, or `asset_out` would drain the asset reserve.
    pub fn quote_native_for_exact_asset(&self, asset_out: Amount) -> Result<Amount> {
        self.inspect(|state| {
            quote_input(asset_out, state.native_reserve, self.ledger_asset_reserve()?)
        })
    }

    /// Asset required to receive exactly `native_out`.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::InvalidQuoteInput`] if `native_out` is zero, a
    /// reserve is empty, or `native_out` would drain the native reserve.
    pub fn quote_asset_for_exact_native(&self, native_out: Amount) -> Result<Amount> {
        self.inspect(|state| {
            quote_input(native_out, self.ledger_asset_reserve()?, state.native_reserve)
        })
    }

    // -- liquidity ----------------------------------------------------------

    /// Adds `native_in` native value and pulls `asset_in` of the asset
    /// from `provider`, minting shares to `provider`.
    ///
    /// - Empty asset reserve: mints `native_in` shares and the deposit sets
    ///   the initial price.
    /// - Otherwise: mints `⌊native_in × total_shares / prior_native⌋`,
    ///   where `prior_native` excludes this payment.
    ///
    /// Under [`DepositPolicy::Permissive`] the asset amount is not checked
    /// against the reserve ratio.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidDeposit`] if either amount is zero, if the
    ///   deposit would mint no shares, or if the proportional policy
    ///   rejects the asset amount.
    /// - [`ExchangeError::ZeroReserve`] if the pool holds the asset but no
    ///   shares or native value to price the deposit against.
    /// - [`ExchangeError::Ledger`] if the asset cannot be pulled.
    pub fn deposit_liquidity(&self, provider: Address, native_in: Amount, asset_in: Amount) -> Result<Shares> {
        self.mutate(|state| {
            if native_in.is_zero() || asset_in.is_zero() {
                return Err(ExchangeError::InvalidDeposit(
                    "native and asset amounts must both be non-zero",
                ));
            }

            let asset_reserve = self.ledger_asset_reserve()?;
            let prior_native = state.native_reserve;
            let total = state.shares.total_supply();

            let minted = if asset_reserve.is_zero() {
                Shares::from(native_in)
            } else {
                if total.is_zero() || prior_native.is_zero() {
                    return Err(ExchangeError::ZeroReserve);
                }
                if self.config.deposit_policy() == DepositPolicy::Proportional {
                    let offered = asset_in.safe_mul(&prior_native)?;
                    let required = native_in.safe_mul(&asset_reserve)?;
                    if offered < required {
                        tracing::warn!(pool = %self.address(), %provider, %native_in, %asset_in, "disproportionate deposit rejected");
                        return Err(ExchangeError::InvalidDeposit(
                            "asset amount below the current reserve ratio",
                        ));
                    }
                }
                Shares::from(mul_div(native_in, total.as_amount(), prior_native)?)
            };

            if minted.is_zero() {
                return Err(ExchangeError::InvalidDeposit("deposit too small to mint shares"));
            }
            let new_native = prior_native.safe_add(&native_in)?;
            total
                .checked_add(&minted)
                .ok_or(ExchangeError::Overflow("share supply overflow"))?;

            self.ledger
                .transfer_from(&self.address(), &provider, &self.address(), asset_in)?;

            state.native_reserve = new_native;
            state.shares.mint(provider, minted)?;
            state.events.push(PoolEvent::LiquidityDeposited {
                provider,
                native_amount: native_in,
                asset_amount: asset_in,
            });
            tracing::info!(pool = %self.address(), %provider, %native_in, %asset_in, shares = %minted, "liquidity deposited");
            Ok(minted)
        })
    }

    /// Burns `shares` of `provider`'s shares and pays out the
    /// proportional part of both reserves.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidWithdrawal`] if `shares` is zero.
    /// - [`ExchangeError::InsufficientShares`] if `provider` holds fewer.
    /// - [`ExchangeError::InvariantViolation`] if the configured
    ///   [`WithdrawalCheck`] fails. Payouts are floored shares of each
    ///   reserve, so only [`WithdrawalCheck::FloorRatio`] can reject them.
    /// - [`ExchangeError::Ledger`] if the asset cannot be paid out.
    pub fn withdraw_liquidity(&self, provider: Address, shares: Shares) -> Result<Withdrawal> {
        self.mutate(|state| {
            if shares.is_zero() {
                return Err(ExchangeError::InvalidWithdrawal("share amount is zero"));
            }
            let have = state.shares.balance_of(&provider);
            if have < shares {
                return Err(ExchangeError::InsufficientShares { have, need: shares });
            }

            let total = state.shares.total_supply();
            let native = state.native_reserve;
            let asset = self.ledger_asset_reserve()?;

            let native_out = mul_div(native, shares.as_amount(), total.as_amount())?;
            let asset_out = mul_div(asset, shares.as_amount(), total.as_amount())?;

            self.check_withdrawal(native, asset, native_out, asset_out)?;
            let new_native = native.safe_sub(&native_out)?;

            self.ledger.transfer(&self.address(), &provider, asset_out)?;

            state.native_reserve = new_native;
            state.shares.burn(provider, shares)?;
            state.events.push(PoolEvent::LiquidityWithdrawn {
                provider,
                native_amount: native_out,
                asset_amount: asset_out,
            });
            tracing::info!(pool = %self.address(), %provider, %shares, %native_out, %asset_out, "liquidity withdrawn");
            Ok(Withdrawal { native_out, asset_out })
        })
    }

    fn check_withdrawal(&self, native: Amount, asset: Amount, native_out: Amount, asset_out: Amount) -> Result<()> {
        let holds = match self.config.withdrawal_check() {
            WithdrawalCheck::CrossMultiplied => {
                let lhs = native.safe_mul(&asset_out)?;
                let rhs = asset.safe_mul(&native_out)?;
                let deviation = lhs.get().abs_diff(rhs.get());
                deviation < native.get().max(asset.get()).max(1)
            }
            WithdrawalCheck::FloorRatio => {
                if native.is_zero() {
                    return Err(ExchangeError::ZeroReserve);
                }
                let before = asset.safe_div(&native)?;
                let native_after = native.safe_sub(&native_out)?;
                if native_after.is_zero() {
                    true
                } else {
                    let asset_after = asset.safe_sub(&asset_out)?;
                    asset_after.safe_div(&native_after)? == before
                }
            }
        };
        if !holds {
            tracing::warn!(pool = %self.address(), %native, %asset, %native_out, %asset_out, "withdrawal breaks reserve ratio");
            return Err(ExchangeError::InvariantViolation(
                "withdrawal changes the reserve ratio",
            ));
        }
        Ok(())
    }

    // -- swaps --------------------------------------------------------------

    /// Swaps `native_in` native value paid by `buyer` for the asset,
    /// delivered to `recipient`.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidRecipient`] if `recipient` is the null
    ///   address or the pool itself.
    /// - [`ExchangeError::InvalidQuoteInput`] if `native_in` is zero or the
    ///   pool is empty.
    /// - [`ExchangeError::SlippageExceeded`] if the output is below
    ///   `min_asset_out`.
    /// - [`ExchangeError::Ledger`] if the asset cannot be delivered.
    pub fn swap_native_for_asset(
        &self,
        buyer: Address,
        native_in: Amount,
        min_asset_out: Amount,
        recipient: Address,
    ) -> Result<Amount> {
        self.mutate(|state| {
            if recipient.is_null() || recipient == self.address() {
                return Err(ExchangeError::InvalidRecipient(
                    "recipient must be a non-null account other than the pool",
                ));
            }

            let asset_reserve = self.ledger_asset_reserve()?;
            let received = state.native_reserve.safe_add(&native_in)?;
            let asset_out = Self::asset_out_for(received, native_in, asset_reserve)?;
            if asset_out < min_asset_out {
                tracing::warn!(pool = %self.address(), %buyer, %native_in, %asset_out, %min_asset_out, "slippage exceeded");
                return Err(ExchangeError::SlippageExceeded {
                    minimum: min_asset_out,
                    actual: asset_out,
                });
            }

            self.ledger.transfer(&self.address(), &recipient, asset_out)?;

            state.native_reserve = received;
            state.events.push(PoolEvent::TokensPurchased {
                buyer,
                native_amount: native_in,
                asset_amount: asset_out,
            });
            tracing::info!(pool = %self.address(), %buyer, %recipient, %native_in, %asset_out, "tokens purchased");
            Ok(asset_out)
        })
    }

    /// Swaps `asset_in` of `seller`'s asset for native value paid to
    /// `seller`.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidQuoteInput`] if `asset_in` is zero or the
    ///   pool is empty.
    /// - [`ExchangeError::SlippageExceeded`] if the output is below
    ///   `min_native_out`.
    /// - [`ExchangeError::Ledger`] if the asset cannot be pulled.
    pub fn swap_asset_for_native(&self, seller: Address, asset_in: Amount, min_native_out: Amount) -> Result<Amount> {
        self.mutate(|state| {
            let received = self.ledger_asset_reserve()?.safe_add(&asset_in)?;
            let native_out = Self::native_out_for(received, asset_in, state.native_reserve)?;
            if native_out < min_native_out {
                tracing::warn!(pool = %self.address(), %seller, %asset_in, %native_out, %min_native_out, "slippage exceeded");
                return Err(ExchangeError::SlippageExceeded {
                    minimum: min_native_out,
                    actual: native_out,
                });
            }
            let new_native = state.native_reserve.safe_sub(&native_out)?;

            self.ledger
                .transfer_from(&self.address(), &seller, &self.address(), asset_in)?;

            state.native_reserve = new_native;
            state.events.push(PoolEvent::TokensSold {
                seller,
                asset_amount: asset_in,
                native_amount: native_out,
            });
            tracing::info!(pool = %self.address(), %seller, %asset_in, %native_out, "tokens sold");
            Ok(native_out)
        })
    }

    // -- shares -------------------------------------------------------------

    /// Moves `amount` shares from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InsufficientShares`] if `from` holds fewer.
    /// - [`ExchangeError::InvalidRecipient`] if `to` is the null address.
    pub fn transfer_shares(&self, from: Address, to: Address, amount: Shares) -> Result<()> {
        self.mutate(|state| {
            state.shares.transfer(from, to, amount)?;
            state.events.push(PoolEvent::SharesTransferred { from, to, amount });
            tracing::debug!(pool = %self.address(), %from, %to, %amount, "shares transferred");
            Ok(())
        })
    }

    /// Allows `spender` to move up to `amount` of `owner`'s shares.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Reentrancy`] or [`ExchangeError::LockPoisoned`].
    pub fn approve_shares(&self, owner: Address, spender: Address, amount: Shares) -> Result<()> {
        self.mutate(|state| {
            state.shares.approve(owner, spender, amount);
            state.events.push(PoolEvent::SharesApproved { owner, spender, amount });
            tracing::debug!(pool = %self.address(), %owner, %spender, %amount, "shares approved");
            Ok(())
        })
    }

    /// Moves `amount` of `from`'s shares to `to` on behalf of `spender`.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InsufficientShareAllowance`] if the allowance is
    ///   too small.
    /// - Any error from [`transfer_shares`](Self::transfer_shares).
    pub fn transfer_shares_from(&self, spender: Address, from: Address, to: Address, amount: Shares) -> Result<()> {
        self.mutate(|state| {
            state.shares.transfer_from(spender, from, to, amount)?;
            state.events.push(PoolEvent::SharesTransferred { from, to, amount });
            tracing::debug!(pool = %self.address(), %spender, %from, %to, %amount, "shares transferred by spender");
            Ok(())
        })
    }

    // -- inspection ---------------------------------------------------------

    /// Native value held by the pool.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Reentrancy`] or [`ExchangeError::LockPoisoned`].
    pub fn native_reserve(&self) -> Result<Amount> {
        self.inspect(|state| Ok(state.native_reserve))
    }

    /// Asset balance of the pool, as reported by the ledger.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Ledger`] if the ledger cannot be read.
    pub fn asset_reserve(&self) -> Result<Amount> {
        self.inspect(|_| self.ledger_asset_reserve())
    }

    /// Both reserves and the share supply, read as one snapshot.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Ledger`] if the ledger cannot be read.
    pub fn reserves(&self) -> Result<Reserves> {
        self.inspect(|state| {
            Ok(Reserves {
                native: state.native_reserve,
                asset: self.ledger_asset_reserve()?,
                total_shares: state.shares.total_supply(),
            })
        })
    }

    /// Outstanding pool shares.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Reentrancy`] or [`ExchangeError::LockPoisoned`].
    pub fn total_shares(&self) -> Result<Shares> {
        self.inspect(|state| Ok(state.shares.total_supply()))
    }

    /// Shares held by `holder`.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Reentrancy`] or [`ExchangeError::LockPoisoned`].
    pub fn share_balance_of(&self, holder: &Address) -> Result<Shares> {
        self.inspect(|state| Ok(state.shares.balance_of(holder)))
    }

    /// Shares `spender` may still move for `owner`.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Reentrancy`] or [`ExchangeError::LockPoisoned`].
    pub fn share_allowance(&self, owner: &Address, spender: &Address) -> Result<Shares> {
        self.inspect(|state| Ok(state.shares.allowance(owner, spender)))
    }

    /// Committed events, oldest first.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Reentrancy`] or [`ExchangeError::LockPoisoned`].
    pub fn events(&self) -> Result<Vec<PoolEvent>> {
        self.inspect(|state| Ok(state.events.clone()))
    }

    /// Committed events from position `from` onwards, oldest first.
    ///
    /// Positions count from the last [`drain_events`](Self::drain_events).
    /// A `from` past the end yields an empty list.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Reentrancy`] or [`ExchangeError::LockPoisoned`].
    pub fn events_since(&self, from: usize) -> Result<Vec<PoolEvent>> {
        self.inspect(|state| Ok(state.events.get(from..).map(<[PoolEvent]>::to_vec).unwrap_or_default()))
    }

    /// Number of committed events held by the pool.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Reentrancy`] or [`ExchangeError::LockPoisoned`].
    pub fn event_count(&self) -> Result<usize> {
        self.inspect(|state| Ok(state.events.len()))
    }

    /// Removes and returns every committed event, oldest first.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Reentrancy`] or [`ExchangeError::LockPoisoned`].
    pub fn drain_events(&self) -> Result<Vec<PoolEvent>> {
        self.mutate(|state| Ok(std::mem::take(&mut state.events)))
    }
}
