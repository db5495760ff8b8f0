//! Fungible bookkeeping of pool shares.

use std::collections::HashMap;

use super::{Address, Shares};
use crate::error::ExchangeError;

/// Balances, allowances and total supply of one pool's shares.
///
/// Every mutating method either applies completely or returns an error
/// without touching any balance.
///
/// # Examples
///
/// ```
/// use hydra_exchange::domain::{Address, ShareLedger, Shares};
///
/// let alice = Address::from_bytes([1u8; 32]);
/// let bob = Address::from_bytes([2u8; 32]);
///
/// let mut ledger = ShareLedger::default();
/// ledger.mint(alice, Shares::new(10)).expect("mint");
/// ledger.transfer(alice, bob, Shares::new(4)).expect("transfer");
/// assert_eq!(ledger.balance_of(&bob), Shares::new(4));
/// assert_eq!(ledger.total_supply(), Shares::new(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareLedger {
    balances: HashMap<Address, Shares>,
    allowances: HashMap<(Address, Address), Shares>,
    total_supply: Shares,
}

impl ShareLedger {
    /// Total shares outstanding.
    #[must_use]
    pub const fn total_supply(&self) -> Shares {
        self.total_supply
    }

    /// Shares held by `holder`.
    #[must_use]
    pub fn balance_of(&self, holder: &Address) -> Shares {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    /// Shares `spender` may still move on behalf of `owner`.
    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Shares {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Creates `amount` new shares for `to`.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Overflow`] if the supply or the balance overflows.
    pub fn mint(&mut self, to: Address, amount: Shares) -> Result<(), ExchangeError> {
        let supply = self
            .total_supply
            .checked_add(&amount)
            .ok_or(ExchangeError::Overflow("share supply overflow"))?;
        let balance = self
            .balance_of(&to)
            .checked_add(&amount)
            .ok_or(ExchangeError::Overflow("share balance overflow"))?;
        self.total_supply = supply;
        self.balances.insert(to, balance);
        Ok(())
    }

    /// Destroys `amount` of `from`'s shares.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::InsufficientShares`] if `from` holds fewer shares.
    pub fn burn(&mut self, from: Address, amount: Shares) -> Result<(), ExchangeError> {
        let have = self.balance_of(&from);
        let balance = have
            .checked_sub(&amount)
            .ok_or(ExchangeError::InsufficientShares { have, need: amount })?;
        let supply = self
            .total_supply
            .checked_sub(&amount)
            .ok_or(ExchangeError::Underflow("share supply underflow"))?;
        self.total_supply = supply;
        self.set_balance(from, balance);
        Ok(())
    }

    /// Moves `amount` shares from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidRecipient`] if `to` is the null address.
    /// - [`ExchangeError::InsufficientShares`] if `from` holds fewer shares.
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: Shares,
    ) -> Result<(), ExchangeError> {
        if to.is_null() {
            return Err(ExchangeError::InvalidRecipient(
                "shares cannot be sent to the null address",
            ));
        }
        let have = self.balance_of(&from);
        let debited = have
            .checked_sub(&amount)
            .ok_or(ExchangeError::InsufficientShares { have, need: amount })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(&to)
            .checked_add(&amount)
            .ok_or(ExchangeError::Overflow("share balance overflow"))?;
        self.set_balance(from, debited);
        self.set_balance(to, credited);
        Ok(())
    }

    /// Sets the allowance of `spender` over `owner`'s shares.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: Shares) {
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }

    /// Moves `amount` of `from`'s shares to `to`, spending `spender`'s
    /// allowance.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InsufficientShareAllowance`] if the allowance is
    ///   too small.
    /// - Any error from [`transfer`](Self::transfer).
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Shares,
    ) -> Result<(), ExchangeError> {
        let have = self.allowance(&from, &spender);
        let remaining = have
            .checked_sub(&amount)
            .ok_or(ExchangeError::InsufficientShareAllowance { have, need: amount })?;
        self.transfer(from, to, amount)?;
        self.approve(from, spender, remaining);
        Ok(())
    }

    fn set_balance(&mut self, holder: Address, balance: Shares) {
        if balance.is_zero() {
            self.balances.remove(&holder);
        } else {
            self.balances.insert(holder, balance);
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn alice() -> Address {
        Address::from_bytes([1u8; 32])
    }

    fn bob() -> Address {
        Address::from_bytes([2u8; 32])
    }

    fn funded(amount: u128) -> ShareLedger {
        let mut ledger = ShareLedger::default();
        let Ok(()) = ledger.mint(alice(), Shares::new(amount)) else {
            panic!("mint");
        };
        ledger
    }

    #[test]
    fn mint_updates_supply_and_balance() {
        let ledger = funded(10);
        assert_eq!(ledger.total_supply(), Shares::new(10));
        assert_eq!(ledger.balance_of(&alice()), Shares::new(10));
        assert_eq!(ledger.balance_of(&bob()), Shares::ZERO);
    }

    #[test]
    fn burn_more_than_held_fails_untouched() {
        let mut ledger = funded(10);
        let before = ledger.clone();
        let err = ledger.burn(alice(), Shares::new(11));
        assert_eq!(
            err,
            Err(ExchangeError::InsufficientShares {
                have: Shares::new(10),
                need: Shares::new(11),
            })
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn burn_everything_clears_entry() {
        let mut ledger = funded(10);
        assert!(ledger.burn(alice(), Shares::new(10)).is_ok());
        assert_eq!(ledger.total_supply(), Shares::ZERO);
        assert_eq!(ledger, ShareLedger::default());
    }

    #[test]
    fn transfer_moves_balance() {
        let mut ledger = funded(10);
        assert!(ledger.transfer(alice(), bob(), Shares::new(3)).is_ok());
        assert_eq!(ledger.balance_of(&alice()), Shares::new(7));
        assert_eq!(ledger.balance_of(&bob()), Shares::new(3));
        assert_eq!(ledger.total_supply(), Shares::new(10));
    }

    #[test]
    fn transfer_to_self_is_noop() {
        let mut ledger = funded(10);
        assert!(ledger.transfer(alice(), alice(), Shares::new(10)).is_ok());
        assert_eq!(ledger.balance_of(&alice()), Shares::new(10));
    }

    #[test]
    fn transfer_to_null_rejected() {
        let mut ledger = funded(10);
        assert!(matches!(
            ledger.transfer(alice(), Address::NULL, Shares::new(1)),
            Err(ExchangeError::InvalidRecipient(_))
        ));
    }

    #[test]
    fn transfer_from_spends_allowance() {
        let mut ledger = funded(10);
        ledger.approve(alice(), bob(), Shares::new(5));
        assert!(
            ledger
                .transfer_from(bob(), alice(), bob(), Shares::new(4))
                .is_ok()
        );
        assert_eq!(ledger.allowance(&alice(), &bob()), Shares::new(1));
        assert_eq!(ledger.balance_of(&bob()), Shares::new(4));
    }

    #[test]
    fn transfer_from_without_allowance_fails() {
        let mut ledger = funded(10);
        assert_eq!(
            ledger.transfer_from(bob(), alice(), bob(), Shares::new(1)),
            Err(ExchangeError::InsufficientShareAllowance {
                have: Shares::ZERO,
                need: Shares::new(1),
            })
        );
    }

    #[test]
    fn transfer_from_failed_transfer_keeps_allowance() {
        let mut ledger = funded(2);
        ledger.approve(alice(), bob(), Shares::new(5));
        assert!(
            ledger
                .transfer_from(bob(), alice(), bob(), Shares::new(3))
                .is_err()
        );
        assert_eq!(ledger.allowance(&alice(), &bob()), Shares::new(5));
    }
}
