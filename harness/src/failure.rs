use std::time::Duration;

use thiserror::Error;

/// Why a batch failed verification.
#[derive(Debug, Error)]
pub enum Failure {
    /// One or more runs were still executing when the bounded wait expired.
    ///
    /// Either the action deadlocked (or is simply slower than the
    /// configured timeout), or a previous run stranded the workers it
    /// needed.
    #[error(
        "{incomplete} of {repeat} runs did not complete within {timeout:?}; \
         raise the timeout or look for a deadlock"
    )]
    Stalled {
        /// Runs that had not finished when the wait expired.
        incomplete: usize,
        /// Runs submitted in total.
        repeat: usize,
        /// The bound that was applied.
        timeout: Duration,
    },

    /// At least one run panicked.
    ///
    /// Carries the message of the most recent panic observed. Takes
    /// precedence over [`Stalled`](Failure::Stalled) when both apply.
    #[error("at least one run panicked: {message}")]
    Panicked {
        /// The captured panic message.
        message: String,
    },
}

static_assertions::assert_impl_all!(Failure: std::error::Error, Send, Sync);
