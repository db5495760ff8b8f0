//! Thread-safe in-memory asset ledger.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::{Address, Amount};
use crate::error::LedgerError;
use crate::traits::AssetLedger;

#[derive(Debug, Default)]
struct Books {
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
}

impl Books {
    fn balance(&self, owner: &Address) -> Amount {
        self.balances.get(owner).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    fn move_balance(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<(), LedgerError> {
        let have = self.balance(from);
        let debited = have
            .checked_sub(&amount)
            .ok_or(LedgerError::InsufficientBalance { have, need: amount })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(to)
            .checked_add(&amount)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert(*from, debited);
        self.balances.insert(*to, credited);
        Ok(())
    }
}

/// A single fungible asset's balances and allowances, held in memory.
///
/// Reference [`AssetLedger`] used by the tests and the demo.  All
/// operations take one internal lock, so each call is atomic.
///
/// # Examples
///
/// ```
/// use hydra_exchange::domain::{Address, Amount};
/// use hydra_exchange::ledger::InMemoryLedger;
/// use hydra_exchange::traits::AssetLedger;
///
/// let alice = Address::from_bytes([1u8; 32]);
/// let bob = Address::from_bytes([2u8; 32]);
///
/// let ledger = InMemoryLedger::new();
/// ledger.mint(&alice, Amount::new(100)).expect("mint");
/// ledger.transfer(&alice, &bob, Amount::new(40)).expect("transfer");
/// assert_eq!(ledger.balance_of(&bob), Ok(Amount::new(40)));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    books: Mutex<Books>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn books(&self) -> Result<MutexGuard<'_, Books>, LedgerError> {
        self.books
            .lock()
            .map_err(|_| LedgerError::Unavailable("ledger lock poisoned"))
    }

    /// Credits `amount` of new units to `owner`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Overflow`] if the balance would overflow.
    pub fn mint(&self, owner: &Address, amount: Amount) -> Result<(), LedgerError> {
        let mut books = self.books()?;
        let credited = books
            .balance(owner)
            .checked_add(&amount)
            .ok_or(LedgerError::Overflow)?;
        books.balances.insert(*owner, credited);
        Ok(())
    }

    /// Sets `spender`'s allowance over `owner`'s balance.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unavailable`] if the ledger lock is poisoned.
    pub fn approve(&self, owner: &Address, spender: &Address, amount: Amount) -> Result<(), LedgerError> {
        self.books()?.allowances.insert((*owner, *spender), amount);
        Ok(())
    }

    /// Returns `spender`'s remaining allowance over `owner`'s balance.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unavailable`] if the ledger lock is poisoned.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Result<Amount, LedgerError> {
        Ok(self.books()?.allowance(owner, spender))
    }

    /// Sum of all balances.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Unavailable`] if the ledger lock is poisoned.
    /// - [`LedgerError::Overflow`] if the sum exceeds `u128`.
    pub fn total_supply(&self) -> Result<Amount, LedgerError> {
        self.books()?
            .balances
            .values()
            .try_fold(Amount::ZERO, |acc, b| acc.checked_add(b))
            .ok_or(LedgerError::Overflow)
    }
}

impl AssetLedger for InMemoryLedger {
    fn balance_of(&self, owner: &Address) -> Result<Amount, LedgerError> {
        Ok(self.books()?.balance(owner))
    }

    fn transfer(&self, from: &Address, to: &Address, amount: Amount) -> Result<(), LedgerError> {
        self.books()?.move_balance(from, to, amount)
    }

    fn transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let mut books = self.books()?;
        let have = books.allowance(from, spender);
        let remaining = have
            .checked_sub(&amount)
            .ok_or(LedgerError::InsufficientAllowance { have, need: amount })?;
        books.move_balance(from, to, amount)?;
        books.allowances.insert((*from, *spender), remaining);
        Ok(())
    }
}
