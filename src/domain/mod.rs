// src/domain/mod.rs
pub mod action;
pub mod content;
pub mod schedule;
pub mod window;

pub use action::NotifyAction;
pub use content::{ContentItem, ContentRecord};
pub use schedule::ScheduleDefaults;
pub use window::{NotifyWindow, SECONDS_PER_DAY};
