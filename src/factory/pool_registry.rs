//! Registry of exchange pools, one per asset.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use crate::config::{RegistryConfig, ReverseLookups};
use crate::domain::{Address, RegistryEvent};
use crate::error::{ExchangeError, Result};
use crate::pools::LiquidityPool;
use crate::traits::AssetLedger;

#[derive(Debug, Default)]
struct RegistryState {
    asset_to_pool: HashMap<Address, Arc<LiquidityPool>>,
    address_to_pool: HashMap<Address, Arc<LiquidityPool>>,
    pool_to_asset: HashMap<Address, Address>,
    id_to_asset: HashMap<u64, Address>,
    pools: Vec<Arc<LiquidityPool>>,
    events: Vec<RegistryEvent>,
}

/// Creates pools and maps assets to them.
///
/// At most one pool exists per asset: the existence check and the insert
/// happen under one write lock.  Pool addresses are derived from the
/// registry address and the creation index, so they are deterministic.
///
/// # Reverse Lookups
///
/// Under [`ReverseLookups::Unpopulated`] (the default),
/// [`lookup_asset_by_pool`](Self::lookup_asset_by_pool) and
/// [`lookup_asset_by_id`](Self::lookup_asset_by_id) always return `None`.
/// [`ReverseLookups::Populated`] records both on creation.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use hydra_exchange::config::RegistryConfig;
/// use hydra_exchange::domain::Address;
/// use hydra_exchange::factory::PoolRegistry;
/// use hydra_exchange::ledger::InMemoryLedger;
///
/// let cfg = RegistryConfig::new(Address::from_bytes([9u8; 32])).expect("valid");
/// let registry = PoolRegistry::new(cfg, Arc::new(InMemoryLedger::new()));
///
/// let asset = Address::from_bytes([1u8; 32]);
/// let pool = registry.create_pool(asset).expect("created");
/// assert_eq!(registry.lookup_pool_by_asset(&asset).expect("readable"), Some(pool));
/// assert!(registry.create_pool(asset).is_err());
/// ```
pub struct PoolRegistry {
    config: RegistryConfig,
    ledger: Arc<dyn AssetLedger>,
    state: RwLock<RegistryState>,
}

impl fmt::Debug for PoolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolRegistry")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl PoolRegistry {
    /// Creates an empty registry whose pools all use `ledger`.
    #[must_use]
    pub fn new(config: RegistryConfig, ledger: Arc<dyn AssetLedger>) -> Self {
        Self {
            config,
            ledger,
            state: RwLock::new(RegistryState::default()),
        }
    }

    /// The registry's configuration.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, RegistryState>> {
        self.state.read().map_err(|_| ExchangeError::LockPoisoned)
    }

    /// Creates the pool for `asset` and returns its address.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidAsset`] if `asset` is the null address.
    /// - [`ExchangeError::PoolAlreadyExists`] if `asset` already has a pool.
    /// - [`ExchangeError::InvalidConfiguration`] if the derived address
    ///   collides with `asset`.
    pub fn create_pool(&self, asset: Address) -> Result<Address> {
        if asset.is_null() {
            return Err(ExchangeError::InvalidAsset("asset is the null address"));
        }

        let mut state = self.state.write().map_err(|_| ExchangeError::LockPoisoned)?;
        if let Some(existing) = state.asset_to_pool.get(&asset) {
            let pool = existing.address();
            tracing::warn!(%asset, %pool, "pool already exists");
            return Err(ExchangeError::PoolAlreadyExists { asset, pool });
        }

        let index = u64::try_from(state.pools.len())
            .map_err(|_| ExchangeError::Overflow("pool index overflow"))?;
        let address = Address::derive(&self.config.address(), index);
        let pool_config = self.config.pool_config(asset, address)?;
        let pool = Arc::new(LiquidityPool::new(pool_config, Arc::clone(&self.ledger))?);

        state.asset_to_pool.insert(asset, Arc::clone(&pool));
        state.address_to_pool.insert(address, Arc::clone(&pool));
        if self.config.reverse_lookups() == ReverseLookups::Populated {
            state.pool_to_asset.insert(address, asset);
            state.id_to_asset.insert(index, asset);
        }
        state.pools.push(pool);
        state.events.push(RegistryEvent::ExchangeCreated { asset, pool: address });

        tracing::info!(%asset, pool = %address, index, "exchange created");
        Ok(address)
    }

    /// Address of the pool trading `asset`.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::LockPoisoned`] if the registry lock is poisoned.
    pub fn lookup_pool_by_asset(&self, asset: &Address) -> Result<Option<Address>> {
        Ok(self.read()?.asset_to_pool.get(asset).map(|p| p.address()))
    }

    /// Asset traded by the pool at `pool`.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::LockPoisoned`] if the registry lock is poisoned.
    pub fn lookup_asset_by_pool(&self, pool: &Address) -> Result<Option<Address>> {
        Ok(self.read()?.pool_to_asset.get(pool).copied())
    }

    /// Asset of the pool created at position `index` (zero-based).
    ///
    /// # Errors
    ///
    /// [`ExchangeError::LockPoisoned`] if the registry lock is poisoned.
    pub fn lookup_asset_by_id(&self, index: u64) -> Result<Option<Address>> {
        Ok(self.read()?.id_to_asset.get(&index).copied())
    }

    /// Number of pools created so far.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::LockPoisoned`] if the registry lock is poisoned.
    pub fn pool_count(&self) -> Result<usize> {
        Ok(self.read()?.pools.len())
    }

    /// Pool at address `pool`.  Independent of [`ReverseLookups`].
    ///
    /// # Errors
    ///
    /// [`ExchangeError::LockPoisoned`] if the registry lock is poisoned.
    pub fn pool(&self, pool: &Address) -> Result<Option<Arc<LiquidityPool>>> {
        Ok(self.read()?.address_to_pool.get(pool).cloned())
    }

    /// Pool trading `asset`.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::LockPoisoned`] if the registry lock is poisoned.
    pub fn pool_for_asset(&self, asset: &Address) -> Result<Option<Arc<LiquidityPool>>> {
        Ok(self.read()?.asset_to_pool.get(asset).cloned())
    }

    /// Pool created at position `index`, in creation order.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::LockPoisoned`] if the registry lock is poisoned.
    pub fn pool_by_index(&self, index: usize) -> Result<Option<Arc<LiquidityPool>>> {
        Ok(self.read()?.pools.get(index).cloned())
    }

    /// All pools, in creation order.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::LockPoisoned`] if the registry lock is poisoned.
    pub fn pools(&self) -> Result<Vec<Arc<LiquidityPool>>> {
        Ok(self.read()?.pools.clone())
    }

    /// Registry events, oldest first.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::LockPoisoned`] if the registry lock is poisoned.
    pub fn events(&self) -> Result<Vec<RegistryEvent>> {
        Ok(self.read()?.events.clone())
    }

    /// Registry events from position `from` onwards, oldest first.
    ///
    /// Positions count from the last [`drain_events`](Self::drain_events).
    ///
    /// # Errors
    ///
    /// [`ExchangeError::LockPoisoned`] if the registry lock is poisoned.
    pub fn events_since(&self, from: usize) -> Result<Vec<RegistryEvent>> {
        Ok(self.read()?.events.get(from..).map(<[RegistryEvent]>::to_vec).unwrap_or_default())
    }

    /// Removes and returns every registry event, oldest first.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::LockPoisoned`] if the registry lock is poisoned.
    pub fn drain_events(&self) -> Result<Vec<RegistryEvent>> {
        let mut state = self.state.write().map_err(|_| ExchangeError::LockPoisoned)?;
        Ok(std::mem::take(&mut state.events))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::{DepositPolicy, WithdrawalCheck};
    use crate::ledger::InMemoryLedger;

    fn registry_addr() -> Address {
        Address::from_bytes([9u8; 32])
    }

    fn asset(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    fn registry_with(cfg: RegistryConfig) -> PoolRegistry {
        PoolRegistry::new(cfg, Arc::new(InMemoryLedger::new()))
    }

    fn registry() -> PoolRegistry {
        let Ok(cfg) = RegistryConfig::new(registry_addr()) else {
            panic!("valid config");
        };
        registry_with(cfg)
    }

    fn create(registry: &PoolRegistry, a: Address) -> Address {
        let Ok(pool) = registry.create_pool(a) else {
            panic!("create_pool");
        };
        pool
    }

    #[test]
    fn create_records_pool_and_event() {
        let reg = registry();
        let pool = create(&reg, asset(1));
        assert_eq!(pool, Address::derive(&registry_addr(), 0));
        assert_eq!(reg.lookup_pool_by_asset(&asset(1)), Ok(Some(pool)));
        assert_eq!(reg.pool_count(), Ok(1));
        assert_eq!(
            reg.events(),
            Ok(vec![RegistryEvent::ExchangeCreated { asset: asset(1), pool }])
        );

        let Ok(Some(instance)) = reg.pool_for_asset(&asset(1)) else {
            panic!("pool instance");
        };
        assert_eq!(instance.asset(), asset(1));
        assert_eq!(instance.creator(), registry_addr());
        assert_eq!(instance.address(), pool);
    }

    #[test]
    fn null_asset_rejected() {
        let reg = registry();
        assert!(matches!(
            reg.create_pool(Address::NULL),
            Err(ExchangeError::InvalidAsset(_))
        ));
        assert_eq!(reg.pool_count(), Ok(0));
    }

    #[test]
    fn duplicate_asset_rejected() {
        let reg = registry();
        let pool = create(&reg, asset(1));
        assert_eq!(
            reg.create_pool(asset(1)),
            Err(ExchangeError::PoolAlreadyExists { asset: asset(1), pool })
        );
        assert_eq!(reg.pool_count(), Ok(1));
        assert_eq!(reg.events().map(|e| e.len()), Ok(1));
    }

    #[test]
    fn pools_enumerate_in_creation_order() {
        let reg = registry();
        let p1 = create(&reg, asset(1));
        let p2 = create(&reg, asset(2));
        assert_ne!(p1, p2);
        let Ok(Some(second)) = reg.pool_by_index(1) else {
            panic!("second pool");
        };
        assert_eq!(second.address(), p2);
        assert!(matches!(reg.pool_by_index(2), Ok(None)));
        let Ok(all) = reg.pools() else {
            panic!("pools");
        };
        let addrs: Vec<Address> = all.iter().map(|p| p.address()).collect();
        assert_eq!(addrs, vec![p1, p2]);
        assert!(matches!(reg.pool(&p1), Ok(Some(_))));
        assert!(matches!(reg.pool(&asset(7)), Ok(None)));
    }

    #[test]
    fn pool_resolves_by_address_without_reverse_lookups() {
        let reg = registry();
        let addrs: Vec<Address> = (1..=50u8).map(|b| create(&reg, asset(b))).collect();
        for (i, addr) in addrs.iter().enumerate() {
            let Ok(Some(found)) = reg.pool(addr) else {
                panic!("pool {i}");
            };
            assert_eq!(found.address(), *addr);
            assert_eq!(reg.lookup_asset_by_pool(addr), Ok(None));
        }
    }

    #[test]
    fn events_since_and_drain() {
        let reg = registry();
        create(&reg, asset(1));
        let p2 = create(&reg, asset(2));
        assert_eq!(
            reg.events_since(1),
            Ok(vec![RegistryEvent::ExchangeCreated { asset: asset(2), pool: p2 }])
        );
        assert_eq!(reg.events_since(3), Ok(Vec::new()));
        assert_eq!(reg.drain_events().map(|e| e.len()), Ok(2));
        assert_eq!(reg.events(), Ok(Vec::new()));
        assert_eq!(reg.pool_count(), Ok(2));
    }

    #[test]
    fn unknown_asset_has_no_pool() {
        assert_eq!(registry().lookup_pool_by_asset(&asset(3)), Ok(None));
    }

    #[test]
    fn reverse_lookups_unpopulated_by_default() {
        let reg = registry();
        let pool = create(&reg, asset(1));
        assert_eq!(reg.lookup_asset_by_pool(&pool), Ok(None));
        assert_eq!(reg.lookup_asset_by_id(0), Ok(None));
    }

    #[test]
    fn reverse_lookups_populated_when_enabled() {
        let Ok(cfg) = RegistryConfig::new(registry_addr()) else {
            panic!("valid config");
        };
        let reg = registry_with(cfg.with_reverse_lookups(ReverseLookups::Populated));
        let pool = create(&reg, asset(1));
        create(&reg, asset(2));
        assert_eq!(reg.lookup_asset_by_pool(&pool), Ok(Some(asset(1))));
        assert_eq!(reg.lookup_asset_by_id(1), Ok(Some(asset(2))));
        assert_eq!(reg.lookup_asset_by_id(2), Ok(None));
    }

    #[test]
    fn policies_forwarded_to_pools() {
        let Ok(cfg) = RegistryConfig::new(registry_addr()) else {
            panic!("valid config");
        };
        let reg = registry_with(
            cfg.with_deposit_policy(DepositPolicy::Proportional)
                .with_withdrawal_check(WithdrawalCheck::FloorRatio),
        );
        create(&reg, asset(1));
        let Ok(Some(pool)) = reg.pool_for_asset(&asset(1)) else {
            panic!("pool instance");
        };
        assert_eq!(pool.config().deposit_policy(), DepositPolicy::Proportional);
        assert_eq!(pool.config().withdrawal_check(), WithdrawalCheck::FloorRatio);
    }
}
