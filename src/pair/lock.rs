//! Per-pair reentrancy guard.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::error::AmmError;

/// Lock flag checked and set at the entry of every mutating pair call.
#[derive(Debug, Default)]
pub(crate) struct ReentrancyGuard {
    locked: AtomicBool,
}

impl ReentrancyGuard {
    pub(crate) const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    /// Takes the lock, or fails with [`AmmError::Locked`] if a call is
    /// already in flight.  The lock is released when the returned token
    /// drops, on every exit path.
    pub(crate) fn enter(&self) -> Result<Entered<'_>, AmmError> {
        self.locked
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AmmError::Locked)?;
        Ok(Entered { guard: self })
    }

    pub(crate) fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }
}

/// Proof that the guard is held.
#[must_use]
pub(crate) struct Entered<'a> {
    guard: &'a ReentrancyGuard,
}

impl Drop for Entered<'_> {
    fn drop(&mut self) {
        self.guard.locked.store(false, Ordering::Release);
    }
}
