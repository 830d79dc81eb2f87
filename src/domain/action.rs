// src/domain/action.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two notification kinds. Each action has its own bundle list, message
/// template, receiver override and persisted last-run timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyAction {
    /// Content approaching its scheduled unpublish date.
    Unpublish,
    /// Content past its freshness threshold and due for an editorial check-in.
    Invalid,
}

impl NotifyAction {
    pub fn key(&self) -> &'static str {
        match self {
            NotifyAction::Unpublish => "unpublish",
            NotifyAction::Invalid => "invalid",
        }
    }

    /// Name under which the action's last-run timestamp is persisted.
    pub fn state_key(&self) -> String {
        format!("content_notify_{}_last_run", self.key())
    }
}

impl fmt::Display for NotifyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
