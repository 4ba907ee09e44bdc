use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

/// A try-acquire gate around a slow critical section.
///
/// Runs that find the gate busy bail out instead of queueing, so at most
/// one run performs the work while the holder sleeps. The entry counter
/// records how many runs made it through.
pub struct Gate {
    busy: AtomicBool,
    entered: AtomicUsize,
    hold: Duration,
}

impl Gate {
    /// A gate whose critical section takes `hold` to complete.
    pub fn new(hold: Duration) -> Self {
        Gate {
            busy: AtomicBool::new(false),
            entered: AtomicUsize::new(0),
            hold,
        }
    }

    pub fn do_something(&self) {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }
        self.entered.fetch_add(1, Ordering::Relaxed);
        thread::sleep(self.hold);
        self.busy.store(false, Ordering::Release);
    }

    /// How many runs made it through the gate.
    pub fn entries(&self) -> usize {
        self.entered.load(Ordering::Relaxed)
    }
}
