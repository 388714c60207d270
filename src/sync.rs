//! Synchronization primitives.

use std::sync::{Arc, Condvar, Mutex, PoisonError};

/// A lock whose guard owns a handle to it.
///
/// `std::sync::MutexGuard` borrows its mutex, so it can't outlive a lookup in
/// a shared map. [`OwnedLock::lock`] returns a guard that keeps the lock alive
/// on its own.
#[derive(Clone, Default)]
pub struct OwnedLock {
    state: Arc<(Mutex<bool>, Condvar)>,
}

/// Releases an [`OwnedLock`] on drop, including during a panic.
pub struct OwnedLockGuard {
    state: Arc<(Mutex<bool>, Condvar)>,
}

impl OwnedLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until the lock is free, then take it.
    pub fn lock(&self) -> OwnedLockGuard {
        let (held, cvar) = &*self.state;
        // A plain flag can't be left half-updated, so poisoning is ignored
        let mut held = held.lock().unwrap_or_else(PoisonError::into_inner);
        while *held {
            held = cvar.wait(held).unwrap_or_else(PoisonError::into_inner);
        }
        *held = true;

        OwnedLockGuard {
            state: Arc::clone(&self.state),
        }
    }
}

impl Drop for OwnedLockGuard {
    fn drop(&mut self) {
        let (held, cvar) = &*self.state;
        *held.lock().unwrap_or_else(PoisonError::into_inner) = false;
        cvar.notify_one();
    }
}
