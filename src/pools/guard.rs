//! Per-pool reentrancy guard.
//!
//! The state lock already serialises callers on different threads.  The
//! guard catches the remaining case: a call back into the same pool from
//! the thread that is inside one of its mutations (typically from a
//! ledger callback), which would otherwise deadlock on the state lock.

use std::sync::Mutex;
use std::thread::{self, ThreadId};

use crate::domain::Address;
use crate::error::ExchangeError;

#[derive(Debug, Default)]
pub(crate) struct ReentrancyGuard {
    owner: Mutex<Option<ThreadId>>,
}

impl ReentrancyGuard {
    /// Fails if the current thread is inside a mutation of this pool.
    pub(crate) fn check(&self, pool: Address) -> Result<(), ExchangeError> {
        let owner = self.owner.lock().map_err(|_| ExchangeError::LockPoisoned)?;
        if *owner == Some(thread::current().id()) {
            tracing::warn!(%pool, "reentrant call rejected");
            return Err(ExchangeError::Reentrancy(pool));
        }
        Ok(())
    }

    /// Marks the current thread as inside a mutation until the returned
    /// token is dropped.  Must only be called while holding the state
    /// write lock.
    pub(crate) fn enter(&self) -> Result<Entered<'_>, ExchangeError> {
        let mut owner = self.owner.lock().map_err(|_| ExchangeError::LockPoisoned)?;
        *owner = Some(thread::current().id());
        Ok(Entered { guard: self })
    }
}

pub(crate) struct Entered<'a> {
    guard: &'a ReentrancyGuard,
}

impl Drop for Entered<'_> {
    fn drop(&mut self) {
        if let Ok(mut owner) = self.guard.owner.lock() {
            if *owner == Some(thread::current().id()) {
                *owner = None;
            }
        }
    }
}
