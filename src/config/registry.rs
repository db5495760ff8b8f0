//! Configuration for the pool registry.

use serde::{Deserialize, Serialize};

use super::{DepositPolicy, PoolConfig, ReverseLookups, WithdrawalCheck};
use crate::domain::Address;
use crate::error::ExchangeError;

/// Parameters of a [`PoolRegistry`](crate::factory::PoolRegistry).
///
/// The deposit policy and withdrawal check are forwarded to every pool
/// the registry creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    address: Address,
    #[serde(default)]
    reverse_lookups: ReverseLookups,
    #[serde(default)]
    deposit_policy: DepositPolicy,
    #[serde(default)]
    withdrawal_check: WithdrawalCheck,
}

impl RegistryConfig {
    /// Creates a validated configuration with default policies.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::InvalidConfiguration`] if `address` is null.
    pub fn new(address: Address) -> Result<Self, ExchangeError> {
        let config = Self {
            address,
            reverse_lookups: ReverseLookups::default(),
            deposit_policy: DepositPolicy::default(),
            withdrawal_check: WithdrawalCheck::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the reverse lookup mode.
    #[must_use]
    pub const fn with_reverse_lookups(mut self, mode: ReverseLookups) -> Self {
        self.reverse_lookups = mode;
        self
    }

    /// Replaces the deposit policy handed to new pools.
    #[must_use]
    pub const fn with_deposit_policy(mut self, policy: DepositPolicy) -> Self {
        self.deposit_policy = policy;
        self
    }

    /// Replaces the withdrawal check handed to new pools.
    #[must_use]
    pub const fn with_withdrawal_check(mut self, check: WithdrawalCheck) -> Self {
        self.withdrawal_check = check;
        self
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::InvalidConfiguration`] if `address` is null.
    pub fn validate(&self) -> Result<(), ExchangeError> {
        if self.address.is_null() {
            return Err(ExchangeError::InvalidConfiguration(
                "registry address is the null address",
            ));
        }
        Ok(())
    }

    /// The registry's own identity, recorded as creator of its pools.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Reverse lookup mode.
    #[must_use]
    pub const fn reverse_lookups(&self) -> ReverseLookups {
        self.reverse_lookups
    }

    /// Builds the configuration of the pool created for `asset` at `pool`.
    ///
    /// # Errors
    ///
    /// Any error from [`PoolConfig::new`].
    pub fn pool_config(&self, asset: Address, pool: Address) -> Result<PoolConfig, ExchangeError> {
        Ok(PoolConfig::new(asset, self.address, pool)?
            .with_deposit_policy(self.deposit_policy)
            .with_withdrawal_check(self.withdrawal_check))
    }
}
