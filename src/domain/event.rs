//! Events recorded by pools and the registry.
//!
//! Events are appended to the owner's log only when an operation commits,
//! so a failed call never leaves a trace in the log.

use serde::{Deserialize, Serialize};

use super::{Address, Amount, Shares};

/// State change recorded by a [`LiquidityPool`](crate::pools::LiquidityPool).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PoolEvent {
    /// Liquidity was added and shares minted to `provider`.
    LiquidityDeposited {
        /// Depositor, who receives the minted shares.
        provider: Address,
        /// Native value supplied.
        native_amount: Amount,
        /// Asset pulled from the provider.
        asset_amount: Amount,
    },

    /// Shares were burned and reserves paid out to `provider`.
    LiquidityWithdrawn {
        /// Share holder receiving the payout.
        provider: Address,
        /// Native value paid out.
        native_amount: Amount,
        /// Asset transferred out.
        asset_amount: Amount,
    },

    /// Native value was swapped into the pool for the asset.
    TokensPurchased {
        /// Payer of the native value.
        buyer: Address,
        /// Native value paid in.
        native_amount: Amount,
        /// Asset delivered to the recipient.
        asset_amount: Amount,
    },

    /// The asset was swapped into the pool for native value.
    TokensSold {
        /// Seller of the asset.
        seller: Address,
        /// Asset pulled from the seller.
        asset_amount: Amount,
        /// Native value paid out.
        native_amount: Amount,
    },

    /// Shares moved between holders.
    SharesTransferred {
        /// Previous holder.
        from: Address,
        /// New holder.
        to: Address,
        /// Shares moved.
        amount: Shares,
    },

    /// A share allowance was set.
    SharesApproved {
        /// Share holder granting the allowance.
        owner: Address,
        /// Account allowed to move the shares.
        spender: Address,
        /// New allowance.
        amount: Shares,
    },
}

/// State change recorded by the [`PoolRegistry`](crate::factory::PoolRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RegistryEvent {
    /// A pool was created for `asset`.
    ExchangeCreated {
        /// Asset the pool trades.
        asset: Address,
        /// Address of the new pool.
        pool: Address,
    },
}
