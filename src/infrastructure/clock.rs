// src/infrastructure/clock.rs
use chrono::Utc;

use crate::application::ports::Clock;

/// Wall clock. Tests use fixed clocks instead.
pub struct SystemClock;

impl Clock for SystemClock {
    fn request_time(&self) -> i64 {
        Utc::now().timestamp()
    }
}
