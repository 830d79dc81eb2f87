// tests/common/mod.rs
//
// In-memory fakes shared by the integration tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use content_notify::{
    ActionSettings, Clock, ContentItem, ContentRecord, ContentStore, Mailer, NotifyAction,
    NotifyError, NotifySettings, OutgoingMail, RunStateStore, SchedulerConfig, Settings,
    SmtpConfig, UrlResolver, WindowQuery,
};

pub struct FakeContentStore {
    items: Mutex<Vec<ContentItem>>,
    queries: AtomicUsize,
}

impl FakeContentStore {
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self {
            items: Mutex::new(items),
            queries: AtomicUsize::new(0),
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn item(&self, id: i64) -> ContentItem {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.id == id && item.default_language)
            .cloned()
            .unwrap()
    }
}

#[async_trait]
impl ContentStore for FakeContentStore {
    async fn find_in_window(&self, query: &WindowQuery) -> Result<Vec<ContentRecord>, NotifyError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .filter(|item| {
                item.published
                    && query.bundles.contains(&item.bundle)
                    && (!query.default_language_only || item.default_language)
                    && item
                        .notify_timestamp(query.action)
                        .map_or(false, |t| query.window.contains(t))
            })
            .map(ContentItem::to_record)
            .collect())
    }

    async fn load_revision(
        &self,
        revision_id: i64,
        langcode: &str,
    ) -> Result<ContentItem, NotifyError> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.revision_id == revision_id && item.langcode == langcode)
            .cloned()
            .ok_or_else(|| NotifyError::NotFound(format!("revision {} ({})", revision_id, langcode)))
    }

    async fn load_item(&self, id: i64) -> Result<ContentItem, NotifyError> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.id == id && item.default_language)
            .cloned()
            .ok_or_else(|| NotifyError::NotFound(format!("item {}", id)))
    }

    async fn save_item(&self, item: &ContentItem) -> Result<(), NotifyError> {
        let mut items = self.items.lock().unwrap();
        match items
            .iter_mut()
            .find(|i| i.revision_id == item.revision_id && i.langcode == item.langcode)
        {
            Some(existing) => *existing = item.clone(),
            None => items.push(item.clone()),
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryRunState {
    timestamps: Mutex<HashMap<NotifyAction, i64>>,
}

impl MemoryRunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(action: NotifyAction, timestamp: i64) -> Self {
        let state = Self::default();
        state.timestamps.lock().unwrap().insert(action, timestamp);
        state
    }
}

#[async_trait]
impl RunStateStore for MemoryRunState {
    async fn last_run(&self, action: NotifyAction) -> Result<i64, NotifyError> {
        Ok(self
            .timestamps
            .lock()
            .unwrap()
            .get(&action)
            .copied()
            .unwrap_or(0))
    }

    async fn set_last_run(&self, action: NotifyAction, timestamp: i64) -> Result<(), NotifyError> {
        self.timestamps.lock().unwrap().insert(action, timestamp);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingMail>>,
    fail_for: Mutex<HashSet<String>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send to this address will fail.
    pub fn fail_for(&self, receiver: &str) {
        self.fail_for.lock().unwrap().insert(receiver.to_string());
    }

    pub fn sent_to(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|mail| mail.receiver.clone())
            .collect()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), NotifyError> {
        if self.fail_for.lock().unwrap().contains(&mail.receiver) {
            return Err(NotifyError::Mail(format!("refused for {}", mail.receiver)));
        }
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn request_time(&self) -> i64 {
        self.0
    }
}

pub struct StaticUrls;

impl UrlResolver for StaticUrls {
    fn canonical_url(&self, item_id: i64, langcode: &str) -> String {
        format!("https://example.com/{}/node/{}", langcode, item_id)
    }
}

pub fn item(
    id: i64,
    bundle: &str,
    owner: Option<&str>,
    notify_unpublish_on: Option<i64>,
    notify_invalid_on: Option<i64>,
) -> ContentItem {
    ContentItem {
        id,
        revision_id: id * 10,
        langcode: "en".to_string(),
        default_language: true,
        title: format!("Item {}", id),
        bundle: bundle.to_string(),
        owner_email: owner.map(str::to_string),
        published: true,
        unpublish_on: notify_unpublish_on,
        notify_unpublish_on,
        notify_invalid_on,
    }
}

pub fn settings() -> Settings {
    Settings {
        base_url: "https://example.com".to_string(),
        langcode: "en".to_string(),
        database_url: "sqlite::memory:".to_string(),
        state_file: "unused.json".to_string(),
        smtp: SmtpConfig::default(),
        scheduler: SchedulerConfig::default(),
        notify: NotifySettings {
            unpublish: ActionSettings {
                bundles: vec!["article".to_string()],
                receiver: None,
                subject: "Content about to be unpublished".to_string(),
                body: "Expiring soon: [content-notify:digest-nodes]".to_string(),
            },
            invalid: ActionSettings {
                bundles: vec!["article".to_string()],
                receiver: None,
                subject: "Stale content".to_string(),
                body: "Please review: [content-notify:digest-nodes]".to_string(),
            },
            ..Default::default()
        },
    }
}
