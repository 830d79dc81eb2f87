// src/domain/schedule.rs
use serde::{Deserialize, Serialize};

use crate::domain::window::SECONDS_PER_DAY;

/// Day counts used to derive initial notification dates for new content.
///
/// A zero day count disables the corresponding derivation, matching an
/// unconfigured setting.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScheduleDefaults {
    /// Days from creation until an item auto-expires when the author sets no
    /// unpublish date.
    #[serde(default)]
    pub set_unpublish_days: i64,
    /// Days before the unpublish date to send the warning notification.
    #[serde(default)]
    pub notify_unpublish_days: i64,
    /// Days after publication to send the stale-content notification.
    #[serde(default)]
    pub notify_invalid_days: i64,
}

impl ScheduleDefaults {
    /// The effective unpublish date: an explicitly authored one wins,
    /// otherwise the configured count of days from creation.
    pub fn unpublish_on(&self, created: i64, explicit: Option<i64>) -> Option<i64> {
        explicit.or_else(|| {
            (self.set_unpublish_days > 0).then(|| created + self.set_unpublish_days * SECONDS_PER_DAY)
        })
    }

    pub fn notify_unpublish_on(&self, unpublish_on: i64) -> Option<i64> {
        (self.notify_unpublish_days > 0)
            .then(|| unpublish_on - self.notify_unpublish_days * SECONDS_PER_DAY)
    }

    pub fn notify_invalid_on(&self, published: i64) -> Option<i64> {
        (self.notify_invalid_days > 0)
            .then(|| published + self.notify_invalid_days * SECONDS_PER_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_unpublish_date_wins() {
        let defaults = ScheduleDefaults {
            set_unpublish_days: 30,
            ..Default::default()
        };
        assert_eq!(defaults.unpublish_on(1_000, Some(5_000)), Some(5_000));
        assert_eq!(
            defaults.unpublish_on(1_000, None),
            Some(1_000 + 30 * SECONDS_PER_DAY)
        );
    }

    #[test]
    fn test_zero_day_counts_disable_derivation() {
        let defaults = ScheduleDefaults::default();
        assert_eq!(defaults.unpublish_on(1_000, None), None);
        assert_eq!(defaults.notify_unpublish_on(1_000), None);
        assert_eq!(defaults.notify_invalid_on(1_000), None);
    }

    #[test]
    fn test_notify_dates_are_relative() {
        let defaults = ScheduleDefaults {
            set_unpublish_days: 0,
            notify_unpublish_days: 7,
            notify_invalid_days: 90,
        };
        let unpublish_on = 100 * SECONDS_PER_DAY;
        assert_eq!(
            defaults.notify_unpublish_on(unpublish_on),
            Some(93 * SECONDS_PER_DAY)
        );
        assert_eq!(
            defaults.notify_invalid_on(10 * SECONDS_PER_DAY),
            Some(100 * SECONDS_PER_DAY)
        );
    }
}
