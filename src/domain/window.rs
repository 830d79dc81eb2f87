// src/domain/window.rs

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Half-open selection interval `(lower, upper]` over unix timestamps.
///
/// A cycle's primary window is `(last_run, current_time]`; a follow-up
/// reminder window is the same interval with both bounds shifted back by the
/// configured day offset. Because consecutive cycles share a bound, every
/// timestamp is picked up by exactly one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyWindow {
    pub lower: i64,
    pub upper: i64,
}

impl NotifyWindow {
    pub fn new(last_run: i64, current_time: i64) -> Self {
        Self {
            lower: last_run,
            upper: current_time,
        }
    }

    /// Shift both bounds back by `days`, selecting items whose timestamp fell
    /// in the primary window `days` ago.
    pub fn with_offset_days(self, days: i64) -> Self {
        let offset = days * SECONDS_PER_DAY;
        Self {
            lower: self.lower - offset,
            upper: self.upper - offset,
        }
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp > self.lower && timestamp <= self.upper
    }
}
