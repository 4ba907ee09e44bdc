//! Bounded-time hang and panic detection for concurrent code under test.
//!
//! [`execute`] captures a closure and hammers it: the closure is run many
//! times, concurrently, across a pool of worker threads. [`verify`] then
//! waits a bounded amount of time for every run to finish and fails the
//! calling test if any run panicked or is still executing when the wait
//! expires — without ever hanging the caller itself.
//!
//! # Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::time::Duration;
//!
//! let hits = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&hits);
//!
//! hangcheck::execute(move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! })
//! .repeat(64)
//! .workers(8)
//! .timeout(Duration::from_secs(5))
//! .verify();
//!
//! assert_eq!(hits.load(Ordering::SeqCst), 64);
//! ```
//!
//! A run that never returns is detected within the timeout rather than
//! wedging the test process:
//! ```rust,should_panic
//! use std::time::Duration;
//!
//! hangcheck::execute(|| loop {
//!     std::thread::park();
//! })
//! .repeat(2)
//! .workers(2)
//! .timeout(Duration::from_millis(100))
//! .verify(); // panics: the runs did not complete
//! ```
//!
//! Workers stranded by a hung run are abandoned, never joined; they cannot
//! block later batches or process exit. [`in_flight_report`] lists them.
//!
//! [`verify`]: Harness::verify

pub(crate) mod failure;
pub(crate) mod harness;
pub(crate) mod latch;
pub(crate) mod pool;
pub(crate) mod probe;

pub use failure::Failure;
pub use harness::{Harness, Report};
pub use probe::{in_flight, in_flight_report};

/// Run `action` concurrently, many times over, on a dedicated pool of
/// worker threads.
///
/// Returns a [`Harness`] through which the batch is configured and then
/// verified exactly once. The action must be callable from many threads at
/// the same time, hence the `Fn + Send + Sync` bound.
#[track_caller]
pub fn execute<A>(action: A) -> Harness<A>
where
    A: Fn() + Send + Sync + 'static,
{
    Harness::new(action, probe::Origin::caller())
}

pub(crate) mod sync {
    #[cfg(loom)]
    pub(crate) use loom::sync::{Condvar, Mutex};

    #[cfg(not(loom))]
    pub(crate) use std::sync::{Condvar, Mutex};
}

#[doc(hidden)]
pub mod internal {
    pub use crate::latch::Latch;
}
