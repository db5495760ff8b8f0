//! Reserve snapshots and withdrawal payouts.

use serde::{Deserialize, Serialize};

use super::{Amount, Shares};

/// A consistent snapshot of a pool's reserves and share supply.
///
/// Produced under the pool's read lock, so the three values always
/// belong to the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reserves {
    /// Native value held by the pool.
    pub native: Amount,
    /// Asset balance of the pool on the ledger.
    pub asset: Amount,
    /// Outstanding pool shares.
    pub total_shares: Shares,
}

impl Reserves {
    /// Returns `true` when the pool holds none of the asset.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.asset.is_zero()
    }

    /// The invariant `k = native × asset`, or `None` on overflow.
    #[must_use]
    pub fn product(&self) -> Option<u128> {
        self.native.get().checked_mul(self.asset.get())
    }
}

/// Amounts paid out by a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    /// Native value paid to the provider.
    pub native_out: Amount,
    /// Asset transferred to the provider.
    pub asset_out: Amount,
}
