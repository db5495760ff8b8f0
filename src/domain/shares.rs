//! Pool share units.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Amount;

/// Units of proportional ownership of a pool's reserves.
///
/// Distinct from [`Amount`] because a share is a claim on *both*
/// reserves, not a quantity of either asset.  All `u128` values are
/// valid share counts.
///
/// # Examples
///
/// ```
/// use hydra_exchange::domain::Shares;
///
/// let a = Shares::new(10);
/// assert_eq!(a.checked_add(&Shares::new(1)), Some(Shares::new(11)));
/// assert_eq!(a.checked_sub(&Shares::new(11)), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Shares(u128);

impl Shares {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Shares` from a raw `u128` value.
    #[must_use]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if there are no shares.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Reinterprets the share count as an [`Amount`] for mixed
    /// share/reserve arithmetic.
    pub const fn as_amount(&self) -> Amount {
        Amount::new(self.0)
    }
}

impl From<Amount> for Shares {
    /// Bootstrap conversion: the first provider receives one share per
    /// unit of native value supplied.
    fn from(amount: Amount) -> Self {
        Self(amount.get())
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
