use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::failure::Failure;
use crate::latch::Latch;
use crate::pool::Pool;
use crate::probe::{self, Origin};

/// Times the action is run unless [`repeat`](Harness::repeat) says otherwise.
const DEFAULT_REPEAT: usize = 1000;
/// Bound on the verification wait unless [`timeout`](Harness::timeout) says
/// otherwise.
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(100);
/// Worker threads the runs are spread across unless
/// [`workers`](Harness::workers) says otherwise.
const DEFAULT_WORKERS: usize = 100;

/// A pending batch of concurrent runs of one action.
///
/// Returned by [`execute`](crate::execute); configured with the builder
/// methods; consumed exactly once by [`verify`](Harness::verify),
/// [`verify_with`](Harness::verify_with) or
/// [`try_verify`](Harness::try_verify).
pub struct Harness<A> {
    action: Arc<A>,
    origin: Origin,
    repeat: usize,
    timeout: Duration,
    workers: usize,
    require_completion: bool,
}

impl<A> Harness<A>
where
    A: Fn() + Send + Sync + 'static,
{
    pub(crate) fn new(action: A, origin: Origin) -> Self {
        Harness {
            action: Arc::new(action),
            origin,
            repeat: DEFAULT_REPEAT,
            timeout: DEFAULT_TIMEOUT,
            workers: DEFAULT_WORKERS,
            require_completion: true,
        }
    }

    /// How many times the action is run (1000 by default).
    pub fn repeat(mut self, times: usize) -> Self {
        self.repeat = times;
        self
    }

    /// How long to wait for every run to finish (100ms by default).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// How many worker threads the runs are spread across (100 by default).
    ///
    /// The pool never exceeds the number of runs, and is never empty.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Whether every run must finish within the wait (true by default).
    ///
    /// Turn this off when the action deliberately sheds work, e.g. a
    /// try-acquire path that bails out while a slow run holds the gate.
    pub fn require_completion(mut self, required: bool) -> Self {
        self.require_completion = required;
        self
    }

    /// Run the batch and panic unless it verifies cleanly.
    ///
    /// The panic message is the [`Failure`], so
    /// `#[should_panic(expected = "...")]` selects the failure kind a test
    /// expects. The failure report is also printed to stderr.
    pub fn verify(self) {
        if let Err(failure) = self.try_verify() {
            eprintln!("hangcheck failure: {}", failure);
            panic!("{}", failure);
        }
    }

    /// Like [`verify`](Harness::verify), then hand control to `checks` for
    /// extra caller assertions.
    pub fn verify_with<C>(self, checks: C)
    where
        C: FnOnce(),
    {
        self.verify();
        checks();
    }

    /// Run the batch and report the outcome instead of panicking.
    ///
    /// Dispatches `repeat` runs of the action across the worker pool, then
    /// waits up to the timeout for all of them to finish. A panic in any
    /// run fails the batch; so does an unfinished run, unless
    /// [`require_completion`](Harness::require_completion) was turned off.
    pub fn try_verify(self) -> Result<Report, Failure> {
        let started = Instant::now();
        let latch = Arc::new(Latch::new(self.repeat));
        let last_panic: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        let pool = Pool::new(self.workers.min(self.repeat).max(1));

        for _ in 0..self.repeat {
            let action = Arc::clone(&self.action);
            let latch = Arc::clone(&latch);
            let last_panic = Arc::clone(&last_panic);
            let origin = self.origin;
            pool.submit(move || {
                let id = probe::register(origin);
                if let Err(payload) = catch_unwind(AssertUnwindSafe(|| (*action)())) {
                    *last_panic.lock().unwrap() = Some(panic_message(payload));
                }
                probe::deregister(id);
                // A panicked run still finished; the panic is reported
                // separately, with precedence over a stall.
                latch.count_down();
            });
        }

        let incomplete = latch.wait_timeout(self.timeout);
        let panicked = last_panic.lock().unwrap().take();

        if let Some(message) = panicked {
            return Err(Failure::Panicked { message });
        }
        if incomplete != 0 && self.require_completion {
            return Err(Failure::Stalled {
                incomplete,
                repeat: self.repeat,
                timeout: self.timeout,
            });
        }
        Ok(Report {
            completed: self.repeat - incomplete,
            repeat: self.repeat,
            elapsed: started.elapsed(),
        })
    }
}

/// What a successful verification observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Runs that finished within the wait.
    pub completed: usize,
    /// Runs submitted in total.
    pub repeat: usize,
    /// Time spent between dispatch and the verdict.
    pub elapsed: Duration,
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

static_assertions::assert_impl_all!(Harness<fn()>: Send);
static_assertions::assert_impl_all!(Report: Send, Sync, Clone);
