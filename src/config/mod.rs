//! Declarative configuration for pools and the registry.
//!
//! Every struct validates on construction and again when a pool or
//! registry is built from it, since deserialised values skip the
//! constructor.

mod policy;
mod pool;
mod registry;

pub use policy::{DepositPolicy, ReverseLookups, WithdrawalCheck};
pub use pool::PoolConfig;
pub use registry::RegistryConfig;
