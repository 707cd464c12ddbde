use chrono::prelude::*;
use getset::Getters;
use serde::{Deserialize, Serialize};

/// A schedule value constrains a single calendar field (minute, hour, etc.)
/// It is either a fixed number or `Any`, which matches every value of the field.
/// A fixed number must be valid for its field (e.g. 0-59 for minutes, 0-23 for hours, etc.);
/// the parser enforces this at construction time.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub enum ScheduleValue {
    Number(u8),
    #[default]
    Any,
}

/// A schedule expression is a set of schedule values for each calendar field
/// (minute, hour, day of month, month, day of week).
///
/// Day of week uses 0 for Sunday through 6 for Saturday.
#[derive(Debug, PartialEq, Eq, Clone, Default, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct ScheduleExpression {
    pub minute: ScheduleValue,
    pub hour: ScheduleValue,
    pub day: ScheduleValue,
    pub month: ScheduleValue,
    /// Day of week (0 = Sunday)
    pub dow: ScheduleValue,
}

impl ScheduleExpression {
    /// Check if the expression matches the given local calendar minute.
    ///
    /// Seconds are ignored: any instant inside a matching minute matches.
    /// Day of month and day of week follow standard cron semantics: when both
    /// are restricted, the date matches if *either* of them matches; when only
    /// one is restricted, only that one is checked.
    ///
    /// ```rust
    /// use minicron_schedule_types::{ScheduleExpression, ScheduleValue};
    ///
    /// // 18:00 every Tuesday
    /// let expr = ScheduleExpression {
    ///     minute: ScheduleValue::Number(0),
    ///     hour: ScheduleValue::Number(18),
    ///     dow: ScheduleValue::Number(2),
    ///     ..Default::default()
    /// };
    /// // 2024-12-10 was a Tuesday
    /// assert!(expr.matches_local(&"2024-12-10T18:00:00".parse().unwrap()));
    /// assert!(expr.matches_local(&"2024-12-10T18:00:59".parse().unwrap()));
    ///
    /// assert!(!expr.matches_local(&"2024-12-10T17:59:00".parse().unwrap()));
    /// assert!(!expr.matches_local(&"2024-12-11T18:00:00".parse().unwrap()));
    /// ```
    pub fn matches_local(&self, at: &NaiveDateTime) -> bool {
        if !(self.minute.matches(at.minute())
            && self.hour.matches(at.hour())
            && self.month.matches(at.month()))
        {
            return false;
        }

        let day_matches = self.day.matches(at.day());
        let dow_matches = self.dow.matches(at.weekday().num_days_from_sunday());
        match (self.day.is_restricted(), self.dow.is_restricted()) {
            (true, true) => day_matches || dow_matches,
            (true, false) => day_matches,
            (false, true) => dow_matches,
            (false, false) => true,
        }
    }

    /// Check if the expression matches an instant, evaluated in the given timezone.
    ///
    /// The instant is converted to the timezone's local calendar fields first,
    /// so the same instant can match under one timezone and not another.
    pub fn matches<Tz: TimeZone>(&self, instant: &DateTime<Utc>, timezone: &Tz) -> bool {
        self.matches_local(&instant.with_timezone(timezone).naive_local())
    }
}

impl ScheduleValue {
    /// Check if the field value satisfies this constraint
    pub fn matches(&self, value: u32) -> bool {
        match self {
            ScheduleValue::Number(n) => u32::from(*n) == value,
            ScheduleValue::Any => true,
        }
    }

    /// Whether this value constrains its field at all
    pub fn is_restricted(&self) -> bool {
        !matches!(self, ScheduleValue::Any)
    }
}
