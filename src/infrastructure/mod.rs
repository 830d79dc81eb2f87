// src/infrastructure/mod.rs
pub mod clock;
pub mod file_run_state;
pub mod smtp_mailer;
pub mod sqlite_store;
pub mod url_resolver;

pub use clock::SystemClock;
pub use file_run_state::FileRunState;
pub use smtp_mailer::SmtpMailer;
pub use sqlite_store::SqliteContentStore;
pub use url_resolver::BaseUrlResolver;
