//! Unified error types for the exchange.
//!
//! Every fallible operation in the crate returns [`ExchangeError`].  Errors
//! raised by the external asset ledger are carried unchanged inside
//! [`ExchangeError::Ledger`] so callers can still tell an insufficient
//! balance apart from an insufficient allowance.
//!
//! All errors are fatal to the single call that produced them: no state
//! is committed, no events are recorded.

use thiserror::Error;

use crate::domain::{Address, Amount, Shares};

/// Failure reported by an [`AssetLedger`](crate::traits::AssetLedger).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The debited account does not hold enough of the asset.
    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance {
        /// Balance currently held.
        have: Amount,
        /// Amount the transfer required.
        need: Amount,
    },

    /// The spender has not been approved for enough of the owner's asset.
    #[error("insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance {
        /// Allowance currently granted.
        have: Amount,
        /// Amount the transfer required.
        need: Amount,
    },

    /// Crediting the receiver would overflow its balance.
    #[error("ledger balance overflow")]
    Overflow,

    /// The ledger's internal state is unusable.
    #[error("ledger unavailable: {0}")]
    Unavailable(&'static str),
}

/// Unified error enum for all pool, pricing and registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// A quote was requested with a zero input or a zero input reserve.
    #[error("invalid quote input: {0}")]
    InvalidQuoteInput(&'static str),

    /// A deposit was rejected before any transfer happened.
    #[error("invalid deposit: {0}")]
    InvalidDeposit(&'static str),

    /// A withdrawal was rejected before any transfer happened.
    #[error("invalid withdrawal: {0}")]
    InvalidWithdrawal(&'static str),

    /// The reserve ratio check around a withdrawal failed.
    #[error("reserve invariant violated: {0}")]
    InvariantViolation(&'static str),

    /// The computed output is below the caller's minimum.
    #[error("slippage exceeded: minimum {minimum}, actual {actual}")]
    SlippageExceeded {
        /// Minimum output the caller accepts.
        minimum: Amount,
        /// Output the pool would have paid.
        actual: Amount,
    },

    /// The null asset address was supplied.
    #[error("invalid asset: {0}")]
    InvalidAsset(&'static str),

    /// The registry already holds a pool for this asset.
    #[error("pool already exists for asset {asset}: {pool}")]
    PoolAlreadyExists {
        /// Asset that was requested.
        asset: Address,
        /// Pool already registered for it.
        pool: Address,
    },

    /// The holder does not own enough pool shares.
    #[error("insufficient shares: have {have}, need {need}")]
    InsufficientShares {
        /// Shares currently held.
        have: Shares,
        /// Shares the operation required.
        need: Shares,
    },

    /// The spender has not been approved for enough pool shares.
    #[error("insufficient share allowance: have {have}, need {need}")]
    InsufficientShareAllowance {
        /// Allowance currently granted.
        have: Shares,
        /// Shares the operation required.
        need: Shares,
    },

    /// The recipient of a transfer is the null address or the pool itself.
    #[error("invalid recipient: {0}")]
    InvalidRecipient(&'static str),

    /// A configuration value is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A reserve needed for a proportional calculation is zero.
    #[error("zero reserve")]
    ZeroReserve,

    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The pool was called again from inside one of its own operations.
    #[error("reentrant call into pool {0}")]
    Reentrancy(Address),

    /// A lock was poisoned by a panic in another thread.
    #[error("state lock poisoned")]
    LockPoisoned,

    /// The asset ledger rejected a call.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, ExchangeError>;
