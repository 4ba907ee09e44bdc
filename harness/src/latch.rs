use std::time::{Duration, Instant};

use crate::sync::{Condvar, Mutex};

/// A countdown latch.
///
/// Starts at `count` and is decremented by worker threads as runs finish;
/// the verifying thread blocks in [`wait_timeout`](Latch::wait_timeout)
/// until the count reaches zero or the deadline passes, whichever comes
/// first. The wait is bounded by construction, so a run that never returns
/// can stall the count but not the waiter.
pub struct Latch {
    count: Mutex<usize>,
    zeroed: Condvar,
}

impl Latch {
    pub fn new(count: usize) -> Self {
        Latch {
            count: Mutex::new(count),
            zeroed: Condvar::new(),
        }
    }

    /// Decrement the count, waking waiters when it reaches zero.
    ///
    /// The count saturates at zero rather than wrapping.
    pub fn count_down(&self) {
        let mut count = self.count.lock().unwrap();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.zeroed.notify_all();
        }
    }

    /// The number of runs still outstanding.
    pub fn remaining(&self) -> usize {
        *self.count.lock().unwrap()
    }

    /// Block until the count reaches zero or `timeout` elapses.
    ///
    /// Returns the count still outstanding at that point; zero means every
    /// run finished in time. Tolerates spurious wakeups.
    pub fn wait_timeout(&self, timeout: Duration) -> usize {
        let deadline = Instant::now() + timeout;
        let mut count = self.count.lock().unwrap();
        while *count != 0 {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            let (guard, _timed_out) = self.zeroed.wait_timeout(count, deadline - now).unwrap();
            count = guard;
        }
        *count
    }
}
