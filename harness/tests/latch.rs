/// Unit checks of the countdown latch, model-checked under loom.
mod util;

use std::sync::Arc;

use hangcheck::internal::Latch;

#[test]
fn counts_down_across_threads() {
    util::model(|| {
        let latch = Arc::new(Latch::new(2));
        let remote = Arc::clone(&latch);
        let handle = util::thread::spawn(move || remote.count_down());
        latch.count_down();
        handle.join().unwrap();
        assert_eq!(latch.remaining(), 0);
    });
}

#[cfg(not(loom))]
#[test]
fn count_saturates_at_zero() {
    let latch = Latch::new(1);
    latch.count_down();
    latch.count_down();
    assert_eq!(latch.remaining(), 0);
}

#[cfg(not(loom))]
#[test]
fn wait_reports_outstanding_runs_on_timeout() {
    use std::time::Duration;

    let latch = Latch::new(3);
    latch.count_down();
    assert_eq!(latch.wait_timeout(Duration::from_millis(50)), 2);
}

#[cfg(not(loom))]
#[test]
fn wait_returns_zero_once_all_runs_finish() {
    use std::time::Duration;

    let latch = Arc::new(Latch::new(1));
    let remote = Arc::clone(&latch);
    let handle = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        remote.count_down();
    });
    assert_eq!(latch.wait_timeout(Duration::from_secs(10)), 0);
    handle.join().unwrap();
}
