#![allow(unused_imports, dead_code)]

use std::time::{Duration, Instant};

pub(crate) fn model<F>(f: F)
where
    F: Fn() + Sync + Send + 'static,
{
    #[cfg(not(loom))]
    f();
    #[cfg(loom)]
    loom::model(f);
}

pub(crate) mod thread {
    #[cfg(not(loom))]
    pub(crate) use std::thread::{spawn, yield_now};

    #[cfg(loom)]
    pub(crate) use loom::thread::{spawn, yield_now};
}

/// Replace line/column numbers and run ages in an in-flight report so
/// reports compare stably across runs.
pub fn strip(report: impl AsRef<str>) -> String {
    let lines = regex::Regex::new(r":\d+:\d+").unwrap();
    let ages = regex::Regex::new(r"\d+(\.\d+)?(ns|µs|ms|s) ago").unwrap();
    let report = lines.replace_all(report.as_ref(), ":LINE:COL");
    ages.replace_all(&report, "AGE ago").to_string()
}

/// Poll `condition` until it holds, panicking after ten seconds.
pub fn eventually(mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while !condition() {
        if Instant::now() >= deadline {
            panic!("condition not met within 10s");
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}
