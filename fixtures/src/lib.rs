//! Deliberately broken concurrency samples, each paired with a fixed
//! counterpart, for exercising the hangcheck harness end to end.
//!
//! Nothing here is useful on its own; the integration tests in `tests/`
//! drive each pair through `hangcheck::execute` and check that the broken
//! half trips the harness while the fixed half verifies cleanly.

pub mod deadlock;
pub mod gate;
pub mod race;
