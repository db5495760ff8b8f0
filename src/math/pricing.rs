//! Constant-product pricing with a fixed 0.3% fee.
//!
//! Pure functions over reserves: no state, no ledger access.  The fee is
//! taken from the tradable input *before* solving `x · y = k`, so every
//! trade leaves the reserve product at least as large as it found it.
//!
//! # Exact input
//!
//! ```text
//! effective = input × 997
//! output    = ⌊effective × output_reserve / (input_reserve × 1000 + effective)⌋
//! ```
//!
//! # Exact output
//!
//! ```text
//! input = ⌊input_reserve × output × 1000 / ((output_reserve − output) × 997)⌋ + 1
//! ```
//!
//! Exact input floors the output.  Exact output floors the quotient and
//! adds one, so both directions favour the pool.

use crate::domain::Amount;
use crate::error::ExchangeError;
use crate::math::CheckedArithmetic;

/// Fee numerator: 997 of every 1000 input units are tradable.
pub const FEE_NUMERATOR: u128 = 997;

/// Fee denominator.
pub const FEE_DENOMINATOR: u128 = 1_000;

/// Output received for selling exactly `input_amount` into a pool.
///
/// # Errors
///
/// - [`ExchangeError::InvalidQuoteInput`] if `input_amount` or
///   `input_reserve` is zero.
/// - [`ExchangeError::Overflow`] if an intermediate product exceeds `u128`.
///
/// # Examples
///
/// ```
/// use hydra_exchange::domain::Amount;
/// use hydra_exchange::math::quote_output;
///
/// let out = quote_output(Amount::new(1), Amount::new(10), Amount::new(10_000));
/// assert_eq!(out, Ok(Amount::new(906)));
/// ```
pub fn quote_output(
    input_amount: Amount,
    input_reserve: Amount,
    output_reserve: Amount,
) -> Result<Amount, ExchangeError> {
    if input_amount.is_zero() {
        return Err(ExchangeError::InvalidQuoteInput("input amount is zero"));
    }
    if input_reserve.is_zero() {
        return Err(ExchangeError::InvalidQuoteInput("input reserve is zero"));
    }

    let effective = input_amount.safe_mul(&Amount::new(FEE_NUMERATOR))?;
    let numerator = effective.safe_mul(&output_reserve)?;
    let denominator = input_reserve
        .safe_mul(&Amount::new(FEE_DENOMINATOR))?
        .safe_add(&effective)?;

    numerator.safe_div(&denominator)
}

/// Input required to buy exactly `output_amount` from a pool.
///
/// # Errors
///
/// - [`ExchangeError::InvalidQuoteInput`] if `output_amount` or either
///   reserve is zero, or if `output_amount` would drain the output reserve.
/// - [`ExchangeError::Overflow`] if an intermediate product exceeds `u128`.
///
/// # Examples
///
/// ```
/// use hydra_exchange::domain::Amount;
/// use hydra_exchange::math::{quote_input, quote_output};
///
/// let need = quote_input(Amount::new(906), Amount::new(10), Amount::new(10_000))
///     .expect("valid quote");
/// assert_eq!(need, Amount::new(1));
/// assert!(quote_output(need, Amount::new(10), Amount::new(10_000)).expect("valid") >= Amount::new(906));
/// ```
pub fn quote_input(
    output_amount: Amount,
    input_reserve: Amount,
    output_reserve: Amount,
) -> Result<Amount, ExchangeError> {
    if output_amount.is_zero() {
        return Err(ExchangeError::InvalidQuoteInput("output amount is zero"));
    }
    if input_reserve.is_zero() || output_reserve.is_zero() {
        return Err(ExchangeError::InvalidQuoteInput("reserve is zero"));
    }
    if output_amount >= output_reserve {
        return Err(ExchangeError::InvalidQuoteInput(
            "output amount drains the reserve",
        ));
    }

    let numerator = input_reserve
        .safe_mul(&output_amount)?
        .safe_mul(&Amount::new(FEE_DENOMINATOR))?;
    let denominator = output_reserve
        .safe_sub(&output_amount)?
        .safe_mul(&Amount::new(FEE_NUMERATOR))?;

    numerator.safe_div(&denominator)?.safe_add(&Amount::new(1))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn out(i: u128, ri: u128, ro: u128) -> Amount {
        let Ok(v) = quote_output(Amount::new(i), Amount::new(ri), Amount::new(ro)) else {
            panic!("expected valid quote");
        };
        v
    }

    #[test]
    fn worked_example() {
        // floor(9_970_000 / 10_997)
        assert_eq!(out(1, 10, 10_000), Amount::new(906));
    }

    #[test]
    fn zero_input_rejected() {
        assert!(matches!(
            quote_output(Amount::ZERO, Amount::new(10), Amount::new(10)),
            Err(ExchangeError::InvalidQuoteInput(_))
        ));
    }

    #[test]
    fn zero_input_reserve_rejected() {
        assert!(matches!(
            quote_output(Amount::new(1), Amount::ZERO, Amount::new(10)),
            Err(ExchangeError::InvalidQuoteInput(_))
        ));
    }

    #[test]
    fn zero_output_reserve_yields_zero() {
        assert_eq!(out(5, 10, 0), Amount::ZERO);
    }

    #[test]
    fn fee_applies_to_symmetric_pool() {
        // Without the fee 1000 in would give floor(1e6 * 1e3 / 1.001e6) = 999.
        assert_eq!(out(1_000, 1_000_000, 1_000_000), Amount::new(996));
    }

    #[test]
    fn never_drains_reserve() {
        assert!(out(u64::MAX.into(), 1, 1_000) < Amount::new(1_000));
    }

    #[test]
    fn product_never_decreases() {
        let (ri, ro, i) = (123_456u128, 987_654u128, 5_000u128);
        let o = out(i, ri, ro).get();
        assert!((ri + i) * (ro - o) >= ri * ro);
    }

    #[test]
    fn overflow_reported() {
        let Err(ExchangeError::Overflow(_)) =
            quote_output(Amount::MAX, Amount::new(1), Amount::new(1))
        else {
            panic!("expected Overflow");
        };
    }

    #[test]
    fn input_quote_covers_requested_output() {
        let Ok(need) = quote_input(Amount::new(500), Amount::new(1_000), Amount::new(2_000)) else {
            panic!("expected valid quote");
        };
        assert!(out(need.get(), 1_000, 2_000) >= Amount::new(500));
        assert!(out(need.get() - 1, 1_000, 2_000) < Amount::new(500));
    }

    #[test]
    fn input_quote_rejects_draining_output() {
        assert!(matches!(
            quote_input(Amount::new(2_000), Amount::new(1_000), Amount::new(2_000)),
            Err(ExchangeError::InvalidQuoteInput(_))
        ));
    }

    #[test]
    fn input_quote_rejects_zero() {
        assert!(quote_input(Amount::ZERO, Amount::new(1), Amount::new(1)).is_err());
        assert!(quote_input(Amount::new(1), Amount::ZERO, Amount::new(5)).is_err());
    }
}
