use chrono::{DateTime, Utc};
use std::future::Future;

/// An injectable time source.
///
/// The scheduler only ever reads time through its clock, so tests can drive
/// it with a controllable [`mock::MockClock`] instead of mutating
/// process-wide time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn sleep_until(&self, datetime: DateTime<Utc>) -> impl Future<Output = ()> + Send;
}

/// The wall clock, backed by `Utc::now` and the tokio timer.
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep_until(&self, datetime: DateTime<Utc>) {
        let dur = datetime - Utc::now();
        let Ok(std_dur) = dur.to_std() else { return };
        tokio::time::sleep(std_dur).await;
    }
}

pub mod mock {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    /// A clock that only moves when the test moves it.
    pub struct MockClock {
        current_time: Arc<Mutex<DateTime<Utc>>>,
        wake_notify: Arc<Notify>,
    }

    impl MockClock {
        pub fn new(initial_time: DateTime<Utc>) -> Self {
            Self {
                current_time: Arc::new(Mutex::new(initial_time)),
                wake_notify: Arc::new(Notify::new()),
            }
        }

        pub fn set_time(&self, time: DateTime<Utc>) {
            *self.current_time.lock().unwrap() = time;
            self.wake_notify.notify_waiters();
        }

        pub fn advance(&self, duration: chrono::Duration) {
            let mut time = self.current_time.lock().unwrap();
            *time += duration;
            drop(time);
            self.wake_notify.notify_waiters();
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> DateTime<Utc> {
            *self.current_time.lock().unwrap()
        }

        async fn sleep_until(&self, datetime: DateTime<Utc>) {
            loop {
                // Register interest before sampling the time, otherwise an
                // advance between the check and the await would be lost.
                let notified = self.wake_notify.notified();
                tokio::pin!(notified);
                notified.as_mut().enable();

                if self.now() >= datetime {
                    return;
                }
                notified.await;
            }
        }
    }

    impl Clock for Arc<MockClock> {
        fn now(&self) -> DateTime<Utc> {
            MockClock::now(self)
        }

        async fn sleep_until(&self, datetime: DateTime<Utc>) {
            MockClock::sleep_until(self, datetime).await
        }
    }
}
