//! Configuration for a single exchange pool.

use serde::{Deserialize, Serialize};

use super::{DepositPolicy, WithdrawalCheck};
use crate::domain::Address;
use crate::error::ExchangeError;

/// Immutable parameters of one native/asset pool.
///
/// # Validation
///
/// - `asset`, `creator` and `address` must not be the null address.
/// - The pool's own `address` must differ from the `asset` it trades.
///
/// # Examples
///
/// ```
/// use hydra_exchange::config::{PoolConfig, WithdrawalCheck};
/// use hydra_exchange::domain::Address;
///
/// let cfg = PoolConfig::new(
///     Address::from_bytes([1u8; 32]),
///     Address::from_bytes([2u8; 32]),
///     Address::from_bytes([3u8; 32]),
/// )
/// .expect("valid config")
/// .with_withdrawal_check(WithdrawalCheck::FloorRatio);
/// assert_eq!(cfg.withdrawal_check(), WithdrawalCheck::FloorRatio);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    asset: Address,
    creator: Address,
    address: Address,
    #[serde(default)]
    deposit_policy: DepositPolicy,
    #[serde(default)]
    withdrawal_check: WithdrawalCheck,
}

impl PoolConfig {
    /// Creates a validated configuration with default policies.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidAsset`] if `asset` is the null address.
    /// - [`ExchangeError::InvalidConfiguration`] for a null `creator` or
    ///   `address`, or an `address` equal to `asset`.
    pub fn new(asset: Address, creator: Address, address: Address) -> Result<Self, ExchangeError> {
        let config = Self {
            asset,
            creator,
            address,
            deposit_policy: DepositPolicy::default(),
            withdrawal_check: WithdrawalCheck::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the deposit policy.
    #[must_use]
    pub const fn with_deposit_policy(mut self, policy: DepositPolicy) -> Self {
        self.deposit_policy = policy;
        self
    }

    /// Replaces the withdrawal check.
    #[must_use]
    pub const fn with_withdrawal_check(mut self, check: WithdrawalCheck) -> Self {
        self.withdrawal_check = check;
        self
    }

    /// Validates all configuration invariants.
    ///
    /// Deserialised configurations bypass [`new`](Self::new), so pool
    /// construction calls this again.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn validate(&self) -> Result<(), ExchangeError> {
        if self.asset.is_null() {
            return Err(ExchangeError::InvalidAsset("asset is the null address"));
        }
        if self.creator.is_null() {
            return Err(ExchangeError::InvalidConfiguration(
                "creator is the null address",
            ));
        }
        if self.address.is_null() {
            return Err(ExchangeError::InvalidConfiguration(
                "pool address is the null address",
            ));
        }
        if self.address == self.asset {
            return Err(ExchangeError::InvalidConfiguration(
                "pool address equals its asset",
            ));
        }
        Ok(())
    }

    /// The asset traded against native value.
    #[must_use]
    pub const fn asset(&self) -> Address {
        self.asset
    }

    /// Who instantiated the pool.
    #[must_use]
    pub const fn creator(&self) -> Address {
        self.creator
    }

    /// The pool's own account on the asset ledger.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Deposit ratio policy.
    #[must_use]
    pub const fn deposit_policy(&self) -> DepositPolicy {
        self.deposit_policy
    }

    /// Withdrawal ratio check.
    #[must_use]
    pub const fn withdrawal_check(&self) -> WithdrawalCheck {
        self.withdrawal_check
    }
}
