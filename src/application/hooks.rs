// src/application/hooks.rs
//
// Extension points mirroring the four alter/gate capabilities other systems
// may plug into a notification cycle. Hooks run in registration order.

use std::sync::Arc;

use crate::application::ports::OutgoingMail;
use crate::domain::{ContentItem, ContentRecord, NotifyAction};

/// One registered extension. Every method has a no-op default so an
/// implementation overrides only what it cares about.
pub trait NotifyHook: Send + Sync {
    /// Add or remove candidate records before digest assembly.
    fn alter_record_list(&self, _records: &mut Vec<ContentRecord>, _action: NotifyAction) {}

    /// Gate the built-in mail dispatch. Returning false means this hook has
    /// taken over (or vetoed) delivery for the recipient.
    fn allow_send(&self, _mail: &OutgoingMail, _action: NotifyAction) -> bool {
        true
    }

    /// Rewrite the resolved recipient address.
    fn alter_receiver(&self, _receiver: &mut String, _item: &ContentItem, _action: NotifyAction) {}

    /// Rewrite a rendered digest line before it joins the recipient's digest.
    fn alter_digest_line(&self, _line: &mut String, _item: &ContentItem) {}
}

#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn NotifyHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: Arc<dyn NotifyHook>) {
        self.hooks.push(hook);
    }

    pub fn alter_record_list(&self, records: &mut Vec<ContentRecord>, action: NotifyAction) {
        for hook in &self.hooks {
            hook.alter_record_list(records, action);
        }
    }

    /// Boolean AND over all hooks. Every hook is consulted even after one
    /// returns false, so each gets to observe the dispatch.
    pub fn allow_send(&self, mail: &OutgoingMail, action: NotifyAction) -> bool {
        let mut allowed = true;
        for hook in &self.hooks {
            allowed &= hook.allow_send(mail, action);
        }
        allowed
    }

    pub fn alter_receiver(&self, receiver: &mut String, item: &ContentItem, action: NotifyAction) {
        for hook in &self.hooks {
            hook.alter_receiver(receiver, item, action);
        }
    }

    pub fn alter_digest_line(&self, line: &mut String, item: &ContentItem) {
        for hook in &self.hooks {
            hook.alter_digest_line(line, item);
        }
    }
}
