use std::mem;
use std::sync::Mutex;

/// Takes a lock and never gives it back.
///
/// The first run leaks the guard, so every later run blocks forever on
/// `enter`.
#[derive(Default)]
pub struct LeakyLock {
    lock: Mutex<()>,
}

impl LeakyLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&self) {
        let guard = self.lock.lock().unwrap();
        mem::forget(guard);
    }
}

/// Takes the same lock but releases it when the critical section ends.
#[derive(Default)]
pub struct BalancedLock {
    lock: Mutex<()>,
}

impl BalancedLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&self) {
        let _guard = self.lock.lock().unwrap();
    }
}
