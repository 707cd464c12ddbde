#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

/// Counts callback fires from a scheduler under test.
///
/// Declared `static` inside each test so the callback closure stays `'static`
/// without sharing state across tests.
pub struct FireCounter(AtomicU32);

impl FireCounter {
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    pub fn increment(&self) -> u32 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn get(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }

    /// Poll until the counter reaches `expected`, panicking after 2 seconds.
    /// Overshooting the expected count fails the assertion as well.
    pub async fn wait_for(&self, expected: u32) {
        let start = Instant::now();
        while self.get() < expected {
            if start.elapsed() > Duration::from_secs(2) {
                panic!(
                    "expected {} fires, observed {} after 2s",
                    expected,
                    self.get()
                );
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(expected, self.get());
    }

    /// Give the timer task time to react to the last clock movement, then
    /// assert the exact count. Used for "nothing fired" assertions.
    pub async fn assert_settled(&self, expected: u32) {
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(expected, self.get());
    }
}

/// Let the timer task reach its next sleep before the clock is moved again.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

/// Parse an RFC 3339 instant; offsets are normalized to UTC.
pub fn instant(s: &str) -> DateTime<Utc> {
    s.parse().expect("invalid test instant")
}
