// src/application/digest.rs
//
// Pure digest assembly: per-item link lines, the body token substitution and
// the per-recipient grouping. No I/O lives here.

use chrono::TimeZone;
use std::collections::{BTreeMap, HashSet};

use crate::domain::{ContentItem, ContentRecord, NotifyAction};

/// The only token supported in body templates.
pub const DIGEST_NODES_TOKEN: &str = "[content-notify:digest-nodes]";

/// All warning dates render in this zone regardless of the server's local
/// zone. Deliberate fixed-zone policy, not an oversight.
const WARNING_TIME_ZONE: chrono_tz::Tz = chrono_tz::America::New_York;

/// Rendering knobs for one cycle's link lines.
#[derive(Debug, Clone)]
pub struct LineOptions<'a> {
    pub action: NotifyAction,
    pub include_date: bool,
    pub unpublish_bundles: &'a [String],
    pub date_format: &'a str,
    pub warning_text: &'a str,
}

/// Format a unix timestamp in the fixed warning zone.
pub fn format_warning_date(timestamp: i64, format: &str) -> String {
    WARNING_TIME_ZONE
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.format(format).to_string())
        .unwrap_or_default()
}

/// Render one item's digest line:
/// `" * <title><br> - <url>"`, optionally followed by the parenthesized
/// unpublish warning, always closed with a paragraph break.
pub fn render_item_line(
    item: &ContentItem,
    record: &ContentRecord,
    url: &str,
    opts: &LineOptions<'_>,
) -> String {
    let mut line = format!(" * {}<br> - {}", item.title, url);

    if opts.action == NotifyAction::Unpublish
        && opts.include_date
        && opts.unpublish_bundles.iter().any(|b| b == &item.bundle)
    {
        if let Some(unpublish_on) = record.notify_unpublish_on {
            let date = format_warning_date(unpublish_on, opts.date_format);
            line.push_str(&format!("<br> - ({} {})", opts.warning_text, date));
        }
    }

    line.push_str("<p>");
    line
}

/// Replace the digest token with the recipient's lines, newline-joined and
/// preceded by one line break. Anything else in the body, brackets included,
/// passes through verbatim.
pub fn replace_digest_token(body: &str, lines: &[String]) -> String {
    let digest = format!("\n{}", lines.join("\n"));
    body.replace(DIGEST_NODES_TOKEN, &digest)
}

/// Digest lines grouped per recipient, keyed by item id so one item never
/// produces two lines for the same recipient in a cycle. Recipients iterate
/// in address order for deterministic dispatch.
#[derive(Debug, Default)]
pub struct DigestList {
    entries: BTreeMap<String, DigestEntry>,
}

#[derive(Debug, Default)]
struct DigestEntry {
    seen: HashSet<i64>,
    lines: Vec<String>,
}

impl DigestList {
    pub fn push(&mut self, receiver: &str, item_id: i64, line: String) {
        let entry = self.entries.entry(receiver.to_string()).or_default();
        if entry.seen.insert(item_id) {
            entry.lines.push(line);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn recipient_count(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(receiver, entry)| (receiver.as_str(), entry.lines.as_slice()))
    }
}
