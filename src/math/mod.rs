//! Integer arithmetic for pricing and share accounting.
//!
//! [`CheckedArithmetic`] and [`mul_div`] provide overflow-safe building
//! blocks; [`pricing`] holds the fee-bearing constant-product quotes.

mod checked;
pub mod pricing;

pub use checked::{CheckedArithmetic, mul_div};
pub use pricing::{FEE_DENOMINATOR, FEE_NUMERATOR, quote_input, quote_output};
