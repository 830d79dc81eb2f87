// src/application/ports.rs
//
// Output ports consumed by the notification manager. Infrastructure adapters
// implement these; tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::domain::{ContentItem, ContentRecord, NotifyAction, NotifyWindow};
use crate::error::NotifyError;

/// A window query against the content store: published items of the given
/// bundles whose action timestamp lies inside the window.
#[derive(Debug, Clone)]
pub struct WindowQuery {
    pub action: NotifyAction,
    pub bundles: Vec<String>,
    pub window: NotifyWindow,
    /// Restrict to default-language revisions (ignore translations).
    pub default_language_only: bool,
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn find_in_window(&self, query: &WindowQuery) -> Result<Vec<ContentRecord>, NotifyError>;

    /// Load a revision and resolve it to the given translation.
    async fn load_revision(
        &self,
        revision_id: i64,
        langcode: &str,
    ) -> Result<ContentItem, NotifyError>;

    /// Load an item's default-language revision by id.
    async fn load_item(&self, id: i64) -> Result<ContentItem, NotifyError>;

    async fn save_item(&self, item: &ContentItem) -> Result<(), NotifyError>;
}

/// Durable per-action last-run timestamps.
#[async_trait]
pub trait RunStateStore: Send + Sync {
    /// Returns 0 when the action has never run.
    async fn last_run(&self, action: NotifyAction) -> Result<i64, NotifyError>;

    async fn set_last_run(&self, action: NotifyAction, timestamp: i64) -> Result<(), NotifyError>;
}

/// A fully built digest message, ready for dispatch.
#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub subject: String,
    pub body: String,
    pub receiver: String,
    pub langcode: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), NotifyError>;
}

/// Resolves an item id plus language to an absolute canonical URL.
pub trait UrlResolver: Send + Sync {
    fn canonical_url(&self, item_id: i64, langcode: &str) -> String;
}

/// Injected request time so window arithmetic never reads ambient clocks.
pub trait Clock: Send + Sync {
    fn request_time(&self) -> i64;
}
