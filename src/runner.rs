use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use minicron_schedule_types::ScheduleExpression;
use tracing::{debug, error};

use crate::clock::Clock;
use crate::utils::round_date_minute;

pub(crate) type FireCallback = Arc<dyn Fn() + Send + Sync>;

/// The timer side of a scheduler: everything the spawned task needs, cloned
/// out of the owning `Scheduler` so the two sides share state through `Arc`s.
pub(crate) struct TickLoop<C: Clock> {
    pub(crate) schedule: ScheduleExpression,
    pub(crate) timezone: Tz,
    pub(crate) callback: FireCallback,
    pub(crate) clock: C,
    pub(crate) running: Arc<AtomicBool>,
    pub(crate) last_fired: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl<C: Clock> TickLoop<C> {
    /// Evaluate once immediately, then at every minute boundary until stopped.
    pub(crate) async fn run(self) {
        self.tick();
        while self.running.load(Ordering::Acquire) {
            let wake_at = round_date_minute(self.clock.now(), true);
            self.clock.sleep_until(wake_at).await;
            self.tick();
        }
    }

    fn tick(&self) {
        // Re-read the clock rather than trusting the wake-up target: the
        // sleep may have overshot, and the timezone offset must be resolved
        // fresh on every tick so DST transitions are honored.
        let now = self.clock.now();
        if !self.schedule.matches(&now, &self.timezone) {
            debug!(at = ?now, "tick: no match");
            return;
        }

        let minute = round_date_minute(now, false);
        let mut last_fired = self.last_fired.lock().unwrap();
        if *last_fired == Some(minute) {
            debug!(at = ?minute, "tick: minute already fired");
            return;
        }

        // A stop may have landed while this tick was in flight: sample the
        // flag one last time so no fire escapes after `stop` returns.
        if !self.running.load(Ordering::Acquire) {
            return;
        }

        *last_fired = Some(minute);
        drop(last_fired);

        debug!(at = ?minute, "fire");
        if let Err(payload) = catch_unwind(AssertUnwindSafe(|| (self.callback)())) {
            let panic_message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| String::from("opaque panic payload"));
            error!(at = ?minute, %panic_message, "fire callback panicked");
        }
    }
}
