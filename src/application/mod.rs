// src/application/mod.rs
pub mod digest;
pub mod hooks;
pub mod manager;
pub mod ports;

pub use digest::{DigestList, LineOptions, DIGEST_NODES_TOKEN};
pub use hooks::{HookRegistry, NotifyHook};
pub use manager::ContentNotifyManager;
pub use ports::{Clock, ContentStore, Mailer, OutgoingMail, RunStateStore, UrlResolver, WindowQuery};
