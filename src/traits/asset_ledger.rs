//! Interface to the external fungible-asset ledger.
//!
//! Pools never cache their asset reserve: every quote and every
//! operation asks the ledger for the pool's balance.  The ledger is
//! shared between pools and callers, so implementations take `&self` and
//! synchronise internally.
//!
//! # Atomicity Contract
//!
//! Each call either applies completely or fails without moving any
//! balance.  A pool performs at most one fallible ledger mutation per
//! operation and commits its own state only after that call succeeds.

use crate::domain::{Address, Amount};
use crate::error::LedgerError;

/// Balance and transfer operations the exchange needs from an asset
/// ledger.
pub trait AssetLedger: Send + Sync {
    /// Returns the balance held by `owner`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unavailable`] if the ledger cannot be read.
    fn balance_of(&self, owner: &Address) -> Result<Amount, LedgerError>;

    /// Moves `amount` from `from` to `to`, authorised by `from` itself.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InsufficientBalance`] if `from` holds too little.
    /// - [`LedgerError::Overflow`] if `to`'s balance would overflow.
    fn transfer(&self, from: &Address, to: &Address, amount: Amount) -> Result<(), LedgerError>;

    /// Moves `amount` from `from` to `to` on behalf of `spender`,
    /// consuming `spender`'s allowance over `from`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InsufficientAllowance`] if the allowance is too
    ///   small.
    /// - [`LedgerError::InsufficientBalance`] if `from` holds too little.
    /// - [`LedgerError::Overflow`] if `to`'s balance would overflow.
    fn transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;
}
