use minicron_schedule_parser::ScheduleParseError;
use thiserror::Error;

/// Errors that can occur while constructing or starting a scheduler.
///
/// Construction errors are surfaced immediately: an invalid pattern or an
/// unknown timezone never silently falls back to a default.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// The cron pattern is malformed or a field is out of range
    #[error("Invalid schedule pattern: {0}")]
    InvalidPattern(#[from] ScheduleParseError),

    /// The timezone identifier does not name a known IANA timezone
    #[error("Unknown timezone identifier: {0}")]
    UnknownTimezone(String),

    /// No schedule pattern was provided before building
    #[error("No schedule pattern configured")]
    MissingPattern,

    /// No fire callback was provided before building
    #[error("No fire callback configured")]
    MissingCallback,

    /// `start` was called while the scheduler was already running
    #[error("Scheduler is already running")]
    AlreadyRunning,
}

/// A Result type alias for SchedulerError.
pub type Result<T> = core::result::Result<T, SchedulerError>;
