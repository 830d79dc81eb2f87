// src/domain/content.rs
use serde::{Deserialize, Serialize};

use crate::domain::action::NotifyAction;
use crate::domain::window::SECONDS_PER_DAY;

/// One row of a window query: just enough to load the matching revision and
/// render its digest line. Full-record equality is the dedup key when the
/// primary and offset windows are unioned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: i64,
    pub revision_id: i64,
    pub langcode: String,
    pub notify_unpublish_on: Option<i64>,
}

/// A resolved content revision/translation as read from the content store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: i64,
    pub revision_id: i64,
    pub langcode: String,
    /// True for the item's default-language revision.
    pub default_language: bool,
    pub title: String,
    /// Content-type tag restricting which actions apply.
    pub bundle: String,
    pub owner_email: Option<String>,
    pub published: bool,
    pub unpublish_on: Option<i64>,
    pub notify_unpublish_on: Option<i64>,
    pub notify_invalid_on: Option<i64>,
}

impl ContentItem {
    /// The action-specific notification timestamp, if set.
    pub fn notify_timestamp(&self, action: NotifyAction) -> Option<i64> {
        match action {
            NotifyAction::Unpublish => self.notify_unpublish_on,
            NotifyAction::Invalid => self.notify_invalid_on,
        }
    }

    pub fn to_record(&self) -> ContentRecord {
        ContentRecord {
            id: self.id,
            revision_id: self.revision_id,
            langcode: self.langcode.clone(),
            notify_unpublish_on: self.notify_unpublish_on,
        }
    }

    /// Shift every stored notification/unpublish date by a signed day count.
    /// Dates that were never set stay unset.
    pub fn extend_dates(&mut self, days: i64) {
        let delta = days * SECONDS_PER_DAY;
        if let Some(ts) = self.unpublish_on {
            self.unpublish_on = Some(ts + delta);
        }
        if let Some(ts) = self.notify_unpublish_on {
            self.notify_unpublish_on = Some(ts + delta);
        }
        if let Some(ts) = self.notify_invalid_on {
            self.notify_invalid_on = Some(ts + delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> ContentItem {
        ContentItem {
            id: 7,
            revision_id: 70,
            langcode: "en".to_string(),
            default_language: true,
            title: "Quarterly report".to_string(),
            bundle: "article".to_string(),
            owner_email: Some("author@example.com".to_string()),
            published: true,
            unpublish_on: Some(10_000),
            notify_unpublish_on: Some(8_000),
            notify_invalid_on: None,
        }
    }

    #[test]
    fn test_notify_timestamp_per_action() {
        let item = item();
        assert_eq!(item.notify_timestamp(NotifyAction::Unpublish), Some(8_000));
        assert_eq!(item.notify_timestamp(NotifyAction::Invalid), None);
    }

    #[test]
    fn test_extend_shifts_only_set_dates() {
        let mut item = item();
        item.extend_dates(2);
        assert_eq!(item.unpublish_on, Some(10_000 + 2 * SECONDS_PER_DAY));
        assert_eq!(item.notify_unpublish_on, Some(8_000 + 2 * SECONDS_PER_DAY));
        assert_eq!(item.notify_invalid_on, None);
    }

    #[test]
    fn test_extend_accepts_negative_days() {
        let mut item = item();
        item.extend_dates(-1);
        assert_eq!(item.unpublish_on, Some(10_000 - SECONDS_PER_DAY));
    }

    #[test]
    fn test_record_equality_is_the_dedup_key() {
        let a = item().to_record();
        let b = item().to_record();
        assert_eq!(a, b);
        let mut c = item();
        c.langcode = "fr".to_string();
        assert_ne!(a, c.to_record());
    }
}
