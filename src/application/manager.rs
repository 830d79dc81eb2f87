// src/application/manager.rs
//
// The notification cycle: select items whose action timestamp entered the
// window since the last run, assemble one digest per recipient, dispatch and
// persist the new last-run timestamp.

use log::{debug, error, info, warn};
use std::sync::Arc;

use crate::application::digest::{replace_digest_token, render_item_line, DigestList, LineOptions};
use crate::application::hooks::{HookRegistry, NotifyHook};
use crate::application::ports::{
    Clock, ContentStore, Mailer, OutgoingMail, RunStateStore, UrlResolver, WindowQuery,
};
use crate::config::Settings;
use crate::domain::{ContentItem, ContentRecord, NotifyAction, NotifyWindow, SECONDS_PER_DAY};
use crate::error::NotifyError;

pub struct ContentNotifyManager {
    settings: Settings,
    store: Arc<dyn ContentStore>,
    state: Arc<dyn RunStateStore>,
    mailer: Arc<dyn Mailer>,
    urls: Arc<dyn UrlResolver>,
    clock: Arc<dyn Clock>,
    hooks: HookRegistry,
}

impl ContentNotifyManager {
    pub fn new(
        settings: Settings,
        store: Arc<dyn ContentStore>,
        state: Arc<dyn RunStateStore>,
        mailer: Arc<dyn Mailer>,
        urls: Arc<dyn UrlResolver>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            settings,
            store,
            state,
            mailer,
            urls,
            clock,
            hooks: HookRegistry::new(),
        }
    }

    /// Register an extension. Hooks run in registration order.
    pub fn register_hook(&mut self, hook: Arc<dyn NotifyHook>) {
        self.hooks.register(hook);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// One scheduler tick: both actions, each isolated so a failing pass
    /// never blocks the other. Errors are logged, not propagated.
    pub async fn run_cycle(&self) {
        if let Err(e) = self.notify_unpublished().await {
            error!("unpublish notification pass failed: {}", e);
        }
        if let Err(e) = self.notify_invalid().await {
            error!("invalid notification pass failed: {}", e);
        }
    }

    /// Notify about content approaching its unpublish date.
    pub async fn notify_unpublished(&self) -> Result<(), NotifyError> {
        let action = NotifyAction::Unpublish;
        let bundles = self.settings.notify.unpublish.bundles.clone();
        if bundles.is_empty() {
            debug!("no bundles configured for action:{}, skipping", action);
            return Ok(());
        }

        let last_run = self.state.last_run(action).await?;
        let current_time = self.clock.request_time();

        let mut records = self
            .query_window(action, &bundles, last_run, current_time, 0)
            .await?;
        self.hooks.alter_record_list(&mut records, action);

        let digests = self.assemble_digests(&records, action).await?;
        self.dispatch(&digests, action).await;
        self.state.set_last_run(action, current_time).await?;
        Ok(())
    }

    /// Notify about content past its freshness threshold, with an optional
    /// second reminder window `second_offset_days` later.
    pub async fn notify_invalid(&self) -> Result<(), NotifyError> {
        let action = NotifyAction::Invalid;
        let bundles = self.settings.notify.invalid.bundles.clone();
        if bundles.is_empty() {
            debug!("no bundles configured for action:{}, skipping", action);
            return Ok(());
        }

        let last_run = self.state.last_run(action).await?;
        let current_time = self.clock.request_time();

        // Digests for this action go out at most once per configured
        // duration; until then the cycle is a no-op that leaves state alone.
        let interval_end = last_run + self.settings.notify.digest_duration_days * SECONDS_PER_DAY;
        if interval_end > current_time {
            debug!(
                "digest interval for action:{} not elapsed, next run at {}",
                action, interval_end
            );
            return Ok(());
        }

        let offset = self.settings.notify.second_offset_days;
        let primary = self
            .query_window(action, &bundles, last_run, current_time, 0)
            .await?;
        let second = self
            .query_window(action, &bundles, last_run, current_time, offset)
            .await?;

        // Depending on the settings, or changes to them, an item can match
        // both windows; a recipient must not get a duplicate notification.
        let mut records = primary;
        for record in second {
            if !records.contains(&record) {
                records.push(record);
            }
        }
        self.hooks.alter_record_list(&mut records, action);

        let digests = self.assemble_digests(&records, action).await?;
        self.dispatch(&digests, action).await;
        self.state.set_last_run(action, current_time).await?;
        Ok(())
    }

    /// Shift an item's stored notification/unpublish dates by `days`
    /// (falling back to the configured default) and persist the result.
    pub async fn extend_notify_dates(
        &self,
        item_id: i64,
        days: Option<i64>,
    ) -> Result<ContentItem, NotifyError> {
        let days = days.unwrap_or(self.settings.notify.extend_days_default);
        let mut item = self.store.load_item(item_id).await?;
        item.extend_dates(days);
        self.store.save_item(&item).await?;
        info!("extended notification dates of item:{} by {} days", item_id, days);
        Ok(item)
    }

    async fn query_window(
        &self,
        action: NotifyAction,
        bundles: &[String],
        last_run: i64,
        current_time: i64,
        offset_days: i64,
    ) -> Result<Vec<ContentRecord>, NotifyError> {
        #[cfg(feature = "debug-overrides")]
        let (last_run, current_time) = match self.settings.notify.debug {
            Some(overrides) => {
                warn!(
                    "window bounds overridden for action:{} (debug-overrides)",
                    action
                );
                (overrides.last_run, overrides.current_time)
            }
            None => (last_run, current_time),
        };

        let query = WindowQuery {
            action,
            bundles: bundles.to_vec(),
            window: NotifyWindow::new(last_run, current_time).with_offset_days(offset_days),
            default_language_only: self.settings.notify.ignore_translations,
        };
        self.store.find_in_window(&query).await
    }

    /// Turn selected records into per-recipient digest lines.
    async fn assemble_digests(
        &self,
        records: &[ContentRecord],
        action: NotifyAction,
    ) -> Result<DigestList, NotifyError> {
        let notify = &self.settings.notify;
        let opts = LineOptions {
            action,
            include_date: notify.include_unpublish_date_in_warning,
            unpublish_bundles: &notify.unpublish.bundles,
            date_format: notify.date_format(),
            warning_text: notify.warning_text(),
        };

        let mut digests = DigestList::default();
        for record in records {
            let item = self
                .store
                .load_revision(record.revision_id, &record.langcode)
                .await?;

            let Some(receiver) = self.resolve_receiver(&item, action) else {
                warn!(
                    "item:{} has no owner email and no receiver override, skipping",
                    item.id
                );
                continue;
            };

            let url = self.urls.canonical_url(item.id, &item.langcode);
            let mut line = render_item_line(&item, record, &url, &opts);
            self.hooks.alter_digest_line(&mut line, &item);
            digests.push(&receiver, item.id, line);
        }
        Ok(digests)
    }

    /// The configured per-action receiver override wins; otherwise the
    /// owning user's address. Hooks get the last word either way.
    fn resolve_receiver(&self, item: &ContentItem, action: NotifyAction) -> Option<String> {
        let configured = self.settings.notify.action(action).receiver.as_deref();
        let mut receiver = match configured.filter(|r| !r.is_empty()) {
            Some(address) => address.to_string(),
            None => item.owner_email.clone()?,
        };
        self.hooks.alter_receiver(&mut receiver, item, action);
        Some(receiver)
    }

    /// Send one digest per recipient. Failures are logged and skipped; the
    /// pass always finishes so the last-run update is never blocked.
    async fn dispatch(&self, digests: &DigestList, action: NotifyAction) {
        if digests.is_empty() {
            debug!("no digests assembled for action:{}, nothing to send", action);
            return;
        }
        info!(
            "dispatching notification:{} to {} recipients",
            action,
            digests.recipient_count()
        );

        let action_settings = self.settings.notify.action(action);
        for (receiver, lines) in digests.iter() {
            let mail = OutgoingMail {
                subject: action_settings.subject.clone(),
                body: replace_digest_token(&action_settings.body, lines),
                receiver: receiver.to_string(),
                langcode: self.settings.langcode.clone(),
            };

            if !self.hooks.allow_send(&mail, action) {
                debug!(
                    "built-in dispatch of notification:{} to email:{} suppressed by hook",
                    action, receiver
                );
                continue;
            }

            match self.mailer.send(&mail).await {
                Ok(()) => info!(
                    "notification:{} has been sent to email:{} and {}",
                    action, receiver, mail.body
                ),
                Err(e) => error!(
                    "there was a problem sending notification:{} to email:{}: {}",
                    action, receiver, e
                ),
            }
        }
    }
}
