//! A minimal timezone-aware cron scheduler.
//!
//! One schedule expression, one callback: the scheduler wakes at every minute
//! boundary, evaluates the expression against the current time in the
//! configured timezone, and fires the callback at most once per matching
//! minute. Expressions are a reduced cron grammar (fixed values and wildcards
//! only), parsed by [`minicron_schedule_parser`].
//!
//! ```rust,no_run
//! use minicron::Scheduler;
//!
//! # #[tokio::main] async fn main() -> Result<(), minicron::SchedulerError> {
//! // Fire every Tuesday at 18:00 UTC
//! let mut scheduler = Scheduler::options()
//!     .pattern("0 18 * * 2")
//!     .timezone("UTC")
//!     .on_fire(|| println!("it is Tuesday evening"))
//!     .build()?;
//! scheduler.start()?;
//! # Ok(()) }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tokio::task::JoinHandle;
use tracing::debug;

pub mod clock;
pub mod errors;
mod runner;
mod utils;

pub use clock::{Clock, SystemClock};
pub use errors::{Result, SchedulerError};
pub use minicron_schedule_parser::{parse_schedule, ScheduleParseError};
pub use minicron_schedule_types::{ScheduleExpression, ScheduleValue};

use runner::{FireCallback, TickLoop};

/// A single recurring schedule bound to a callback.
///
/// The timer runs on its own tokio task; [`Scheduler::start`] and
/// [`Scheduler::stop`] must therefore be called from within a tokio runtime.
/// The callback is invoked synchronously on the timer task and is expected to
/// be fast; long-running work should be handed off to its own task.
pub struct Scheduler<C = SystemClock>
where
    C: Clock + Clone + Send + Sync + 'static,
{
    schedule: ScheduleExpression,
    timezone: Tz,
    callback: FireCallback,
    clock: C,
    running: Arc<AtomicBool>,
    last_fired: Arc<Mutex<Option<DateTime<Utc>>>>,
    timer: Option<JoinHandle<()>>,
}

impl Scheduler<SystemClock> {
    /// Start configuring a scheduler backed by the system clock.
    pub fn options() -> SchedulerOptions {
        SchedulerOptions::default()
    }

    /// Positional construction: pattern, callback, auto-start flag, timezone.
    ///
    /// Equivalent to the builder with every option set explicitly.
    pub fn new<F>(pattern: &str, callback: F, auto_start: bool, timezone: &str) -> Result<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        Scheduler::options()
            .pattern(pattern)
            .on_fire(callback)
            .auto_start(auto_start)
            .timezone(timezone)
            .build()
    }
}

impl<C> Scheduler<C>
where
    C: Clock + Clone + Send + Sync + 'static,
{
    /// Spawn the timer task.
    ///
    /// The task evaluates the schedule once immediately, then at every minute
    /// boundary. Calling `start` while the scheduler is already running is an
    /// error ([`SchedulerError::AlreadyRunning`]); stop it first.
    pub fn start(&mut self) -> Result<()> {
        if self.running.swap(true, Ordering::AcqRel) {
            return Err(SchedulerError::AlreadyRunning);
        }

        let tick_loop = TickLoop {
            schedule: self.schedule.clone(),
            timezone: self.timezone,
            callback: self.callback.clone(),
            clock: self.clock.clone(),
            running: self.running.clone(),
            last_fired: self.last_fired.clone(),
        };
        debug!(schedule = ?self.schedule, timezone = %self.timezone, "scheduler started");
        self.timer = Some(tokio::spawn(tick_loop.run()));
        Ok(())
    }

    /// Stop the timer and cancel any pending wake-up.
    ///
    /// Idempotent: stopping an already-stopped scheduler is a no-op. After
    /// `stop` returns, a tick that was in flight can no longer fire: the
    /// timer task samples the running flag immediately before invoking the
    /// callback.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(timer) = self.timer.take() {
            timer.abort();
            debug!("scheduler stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// The minute boundary of the most recent fire, if any.
    ///
    /// Survives stop/start cycles, so restarting within a matching minute
    /// does not fire that minute a second time.
    pub fn last_fired(&self) -> Option<DateTime<Utc>> {
        *self.last_fired.lock().unwrap()
    }

    pub fn schedule(&self) -> &ScheduleExpression {
        &self.schedule
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}

impl<C> Drop for Scheduler<C>
where
    C: Clock + Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.stop();
    }
}

/// Builder for [`Scheduler`], in the usual options style.
///
/// `pattern` and `on_fire` are required; `timezone` defaults to UTC and
/// `auto_start` to false.
#[derive(Default)]
pub struct SchedulerOptions {
    pattern: Option<String>,
    timezone: Option<String>,
    auto_start: bool,
    callback: Option<FireCallback>,
}

impl SchedulerOptions {
    /// The five-field schedule pattern, e.g. `"0 18 * * 2"`.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// IANA timezone identifier the schedule is evaluated in, e.g.
    /// `"Europe/Paris"`. Defaults to `"UTC"`.
    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Start the timer as soon as the scheduler is built.
    pub fn auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    /// The callback invoked once per matching minute.
    pub fn on_fire<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Build against the system clock.
    pub fn build(self) -> Result<Scheduler<SystemClock>> {
        self.build_with_clock(SystemClock)
    }

    /// Build against an injected time source (tests use
    /// [`clock::mock::MockClock`]).
    ///
    /// Fails fast on a malformed pattern or an unknown timezone; neither is
    /// ever silently replaced with a default.
    pub fn build_with_clock<C>(self, clock: C) -> Result<Scheduler<C>>
    where
        C: Clock + Clone + Send + Sync + 'static,
    {
        let pattern = self.pattern.ok_or(SchedulerError::MissingPattern)?;
        let callback = self.callback.ok_or(SchedulerError::MissingCallback)?;
        let schedule = parse_schedule(&pattern)?;

        let timezone_name = self.timezone.as_deref().unwrap_or("UTC");
        let timezone: Tz = timezone_name
            .parse()
            .map_err(|_| SchedulerError::UnknownTimezone(timezone_name.to_string()))?;

        let mut scheduler = Scheduler {
            schedule,
            timezone,
            callback,
            clock,
            running: Arc::new(AtomicBool::new(false)),
            last_fired: Arc::new(Mutex::new(None)),
            timer: None,
        };
        if self.auto_start {
            scheduler.start()?;
        }
        Ok(scheduler)
    }
}
