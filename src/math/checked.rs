//! Checked arithmetic for domain wrapper types.
//!
//! [`CheckedArithmetic`] turns the `Option`-returning checked methods of
//! [`Amount`] into `Result`s carrying a specific
//! [`ExchangeError`], so pricing and pool code can chain them with `?`.
//!
//! # Examples
//!
//! ```
//! use hydra_exchange::domain::Amount;
//! use hydra_exchange::math::CheckedArithmetic;
//!
//! let sum = Amount::new(100).safe_add(&Amount::new(200));
//! assert_eq!(sum, Ok(Amount::new(300)));
//! assert!(Amount::MAX.safe_add(&Amount::new(1)).is_err());
//! ```

use crate::domain::Amount;
use crate::error::ExchangeError;

/// Fallible arithmetic for domain wrapper types.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation**: errors propagate instead of clamping.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] if the result exceeds `u128`.
    fn safe_add(&self, other: &Self) -> Result<Self, ExchangeError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, ExchangeError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] if the result exceeds `u128`.
    fn safe_mul(&self, other: &Self) -> Result<Self, ExchangeError>;

    /// Checked floor division.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self) -> Result<Self, ExchangeError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, ExchangeError> {
        self.checked_add(other)
            .ok_or(ExchangeError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, ExchangeError> {
        self.checked_sub(other)
            .ok_or(ExchangeError::Underflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, ExchangeError> {
        self.checked_mul(other)
            .ok_or(ExchangeError::Overflow("amount multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self) -> Result<Self, ExchangeError> {
        self.checked_div(other).ok_or(ExchangeError::DivisionByZero)
    }
}

/// Computes `⌊value × numerator / denominator⌋`.
///
/// The workhorse of every proportional calculation in the pool: share
/// minting, withdrawal payouts and ratio checks.
///
/// # Errors
///
/// - [`ExchangeError::Overflow`] if `value × numerator` exceeds `u128`.
/// - [`ExchangeError::DivisionByZero`] if `denominator` is zero.
///
/// # Examples
///
/// ```
/// use hydra_exchange::domain::Amount;
/// use hydra_exchange::math::mul_div;
///
/// let out = mul_div(Amount::new(9_094), Amount::new(3), Amount::new(11));
/// assert_eq!(out, Ok(Amount::new(2_480)));
/// ```
pub fn mul_div(
    value: Amount,
    numerator: Amount,
    denominator: Amount,
) -> Result<Amount, ExchangeError> {
    value.safe_mul(&numerator)?.safe_div(&denominator)
}
