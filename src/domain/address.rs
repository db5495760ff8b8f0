//! Chain-agnostic account identity.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

/// A 32-byte account identity on the host ledger.
///
/// Used for assets, pools, liquidity providers and the registry alike.
/// All 32-byte sequences are valid; the all-zero value is the *null*
/// address and is rejected wherever an identity is required.
///
/// Serialised as a `0x`-prefixed lowercase hex string.
///
/// # Examples
///
/// ```
/// use hydra_exchange::domain::Address;
///
/// let a = Address::from_bytes([7u8; 32]);
/// assert!(!a.is_null());
/// assert!(Address::NULL.is_null());
/// assert_eq!(a.to_string().len(), 66);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 32]);

impl Address {
    /// The null address (all zero bytes).
    pub const NULL: Self = Self([0u8; 32]);

    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` for the null address.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        let mut i = 0;
        while i < 32 {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Derives the address of the `nonce`-th account created by `creator`.
    ///
    /// `SHA-256(creator || nonce_be)`.  Distinct `(creator, nonce)` pairs
    /// yield distinct addresses with overwhelming probability.
    #[must_use]
    pub fn derive(creator: &Self, nonce: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(creator.0);
        hasher.update(nonce.to_be_bytes());
        Self(hasher.finalize().into())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Error returned when parsing an [`Address`] from a hex string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseAddressError {
    /// The string is not valid hex.
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    /// The decoded value is not 32 bytes long.
    #[error("expected 32 bytes, got {0}")]
    Length(usize),
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits)?;
        let len = bytes.len();
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| ParseAddressError::Length(len))?;
        Ok(Self(arr))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
