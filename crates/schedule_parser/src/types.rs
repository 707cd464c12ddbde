/// The five calendar fields of a schedule pattern, in pattern order.
pub enum SchedulePart {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

impl SchedulePart {
    /// Inclusive bounds for a fixed value in this field.
    ///
    /// Day of week is Sunday-based: 0 is Sunday, 6 is Saturday.
    pub fn boundaries(&self) -> (u8, u8) {
        match self {
            SchedulePart::Minute => (0, 59),
            SchedulePart::Hour => (0, 23),
            SchedulePart::DayOfMonth => (1, 31),
            SchedulePart::Month => (1, 12),
            SchedulePart::DayOfWeek => (0, 6),
        }
    }
}
