use std::fmt;
use std::hash::BuildHasherDefault;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use dashmap::DashMap;
use itertools::Itertools;
use once_cell::sync::Lazy;
use rustc_hash::FxHasher;

/// Every run a harness dispatches is tracked here from the moment a worker
/// picks it up until it finishes. Runs that hang never deregister, so the
/// map doubles as a process-wide census of stranded workers.
static PROBES: Lazy<DashMap<ProbeId, Probe, BuildHasherDefault<FxHasher>>> =
    Lazy::new(DashMap::default);

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ProbeId(u64);

struct Probe {
    origin: Origin,
    started: Instant,
}

/// The `execute` call site a run was submitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Origin {
    file: &'static str,
    line: u32,
    column: u32,
}

impl Origin {
    #[track_caller]
    pub(crate) fn caller() -> Self {
        let location = std::panic::Location::caller();
        Origin {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

pub(crate) fn register(origin: Origin) -> ProbeId {
    let id = ProbeId(NEXT_ID.fetch_add(1, Ordering::Relaxed));
    PROBES.insert(
        id,
        Probe {
            origin,
            started: Instant::now(),
        },
    );
    id
}

pub(crate) fn deregister(id: ProbeId) {
    PROBES.remove(&id);
}

/// The number of submitted runs that have not yet finished.
///
/// Includes runs that are genuinely executing at this instant; anything
/// still listed long after its batch was verified is a stranded worker.
pub fn in_flight() -> usize {
    PROBES.len()
}

/// One line per run still executing, with the `execute` call site it was
/// submitted from and its age. Lines are sorted so reports compare stably.
pub fn in_flight_report() -> String {
    let lines = PROBES.iter().map(|entry| {
        let probe = entry.value();
        format!(
            "╼ run submitted at {} ({:?} ago)",
            probe.origin,
            probe.started.elapsed()
        )
    });
    itertools::join(lines.sorted(), "\n")
}
