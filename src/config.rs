// src/config.rs
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::domain::{NotifyAction, ScheduleDefaults};

/// strftime equivalent of the stock warning-date format ("F j Y H:i T").
pub const DEFAULT_DATE_FORMAT: &str = "%B %-d %Y %H:%M %Z";
pub const DEFAULT_WARNING_TEXT: &str = "scheduled to be auto-archived";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SmtpConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    pub from_name: Option<String>,
    pub use_tls: bool,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            from_address: "noreply@example.com".to_string(),
            from_name: Some("Content Notify".to_string()),
            use_tls: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SchedulerConfig {
    /// Seconds between notification cycles in daemon mode.
    pub interval_seconds: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3_600,
        }
    }
}

/// Per-action mail settings. An empty bundle list disables the action.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ActionSettings {
    #[serde(default)]
    pub bundles: Vec<String>,
    /// Override recipient. When unset, mail goes to each item's owner.
    #[serde(default)]
    pub receiver: Option<String>,
    #[serde(default)]
    pub subject: String,
    /// Body template; `[content-notify:digest-nodes]` is the only token.
    #[serde(default)]
    pub body: String,
}

/// Fixed window bounds for manual testing of the window arithmetic.
#[cfg(feature = "debug-overrides")]
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct DebugOverrides {
    pub last_run: i64,
    pub current_time: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct NotifySettings {
    #[serde(default)]
    pub unpublish: ActionSettings,
    #[serde(default)]
    pub invalid: ActionSettings,
    /// Days after the first stale-content reminder to send a second one.
    #[serde(default)]
    pub second_offset_days: i64,
    /// Minimum days between stale-content digest cycles.
    #[serde(default)]
    pub digest_duration_days: i64,
    #[serde(default)]
    pub include_unpublish_date_in_warning: bool,
    /// strftime pattern for the warning date; empty falls back to the stock
    /// format.
    #[serde(default)]
    pub date_format: Option<String>,
    #[serde(default)]
    pub unpublish_date_warning_text: Option<String>,
    /// When set, only default-language revisions are notified.
    #[serde(default)]
    pub ignore_translations: bool,
    #[serde(default)]
    pub schedule: ScheduleDefaults,
    /// Day count backing the extend operation when no explicit count is given.
    #[serde(default)]
    pub extend_days_default: i64,
    #[cfg(feature = "debug-overrides")]
    #[serde(default)]
    pub debug: Option<DebugOverrides>,
}

impl NotifySettings {
    pub fn action(&self, action: NotifyAction) -> &ActionSettings {
        match action {
            NotifyAction::Unpublish => &self.unpublish,
            NotifyAction::Invalid => &self.invalid,
        }
    }

    /// Whether a bundle participates in the given action.
    pub fn action_covers_bundle(&self, action: NotifyAction, bundle: &str) -> bool {
        self.action(action).bundles.iter().any(|b| b == bundle)
    }

    pub fn date_format(&self) -> &str {
        self.date_format
            .as_deref()
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_DATE_FORMAT)
    }

    pub fn warning_text(&self) -> &str {
        self.unpublish_date_warning_text
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_WARNING_TEXT)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Site base URL used to build absolute canonical item links.
    pub base_url: String,
    /// Interface language sent along with every message.
    #[serde(default = "default_langcode")]
    pub langcode: String,
    pub database_url: String,
    /// Path of the JSON file holding per-action last-run timestamps.
    pub state_file: String,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub notify: NotifySettings,
}

fn default_langcode() -> String {
    "en".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("config").required(true))
            .add_source(Environment::with_prefix("APP"));

        if let Ok(env) = std::env::var("APP_ENV") {
            builder =
                builder.add_source(File::with_name(&format!("config.{}", env)).required(false));
        }

        builder.build()?.try_deserialize()
    }

    pub fn load_from_file(filename: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(filename)?;
        let config: Settings = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
