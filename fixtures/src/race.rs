use std::sync::Mutex;

/// Stores then takes a value in two separate critical sections.
///
/// Between the store and the take there is a window in which another run
/// can steal the value; the loser's `take` then finds the slot empty and
/// panics.
pub struct StealableSlot {
    slot: Mutex<Option<&'static str>>,
}

impl StealableSlot {
    pub fn new() -> Self {
        StealableSlot {
            slot: Mutex::new(None),
        }
    }

    pub fn store_then_take(&self) {
        self.slot.lock().unwrap().replace("token");
        self.slot.lock().unwrap().take().unwrap();
    }
}

/// The same store-then-take under a single critical section: no window,
/// nothing to steal.
pub struct GuardedSlot {
    slot: Mutex<Option<&'static str>>,
}

impl GuardedSlot {
    pub fn new() -> Self {
        GuardedSlot {
            slot: Mutex::new(None),
        }
    }

    pub fn store_then_take(&self) {
        let mut slot = self.slot.lock().unwrap();
        slot.replace("token");
        slot.take().unwrap();
    }
}
