/// End-to-end checks of the harness against the sample fixtures: each
/// broken sample must trip verification, each fixed counterpart must pass.
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use hangcheck::{execute, Failure};
use hangcheck_fixtures::deadlock::{BalancedLock, LeakyLock};
use hangcheck_fixtures::gate::Gate;
use hangcheck_fixtures::race::{GuardedSlot, StealableSlot};
use pretty_assertions::assert_eq;

/// Takes a lock and never releases it.
#[test]
#[should_panic(expected = "did not complete")]
fn leaked_lock_is_reported_as_a_stall() {
    let fixture = Arc::new(LeakyLock::new());
    let sample = Arc::clone(&fixture);

    execute(move || sample.enter())
        .repeat(100) // avoid claiming all the system resources
        .timeout(Duration::from_millis(200))
        .verify();
}

/// Takes the same lock but releases it.
#[test]
fn balanced_lock_verifies_cleanly() {
    let fixture = Arc::new(BalancedLock::new());
    let sample = Arc::clone(&fixture);

    execute(move || sample.enter())
        .repeat(100)
        .timeout(Duration::from_secs(5))
        .verify();
}

/// Two critical sections with a window in between: some run takes from an
/// emptied slot and panics.
#[test]
fn stealable_slot_trips_the_harness() {
    // The steal is probabilistic per batch; a handful of batches makes a
    // miss vanishingly unlikely.
    for _ in 0..5 {
        let fixture = Arc::new(StealableSlot::new());
        let sample = Arc::clone(&fixture);
        let verdict = execute(move || sample.store_then_take())
            .repeat(2000)
            .workers(64)
            .timeout(Duration::from_secs(10))
            .try_verify();

        if let Err(Failure::Panicked { message }) = verdict {
            assert!(message.contains("Option::unwrap()"), "message: {}", message);
            return;
        }
    }
    panic!("the stealable slot never tripped verification");
}

/// One critical section, no window.
#[test]
fn guarded_slot_verifies_cleanly() {
    let fixture = Arc::new(GuardedSlot::new());
    let sample = Arc::clone(&fixture);

    execute(move || sample.store_then_take())
        .repeat(2000)
        .workers(64)
        .timeout(Duration::from_secs(10))
        .verify();
}

/// Only one run gets through the gate while the holder sleeps; the rest
/// bail out, so completion cannot be required.
#[test]
fn gate_admits_one_run_during_the_window() {
    let gate = Arc::new(Gate::new(Duration::from_secs(2)));
    let sample = Arc::clone(&gate);

    execute(move || sample.do_something())
        .repeat(500)
        .timeout(Duration::from_millis(200))
        .require_completion(false)
        .verify_with(|| {
            // The winner increments before it starts sleeping; give the
            // scheduler a moment to have started it at all.
            let deadline = Instant::now() + Duration::from_secs(10);
            while gate.entries() == 0 && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(10));
            }
            assert_eq!(gate.entries(), 1);
        });
}
