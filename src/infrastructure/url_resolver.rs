// src/infrastructure/url_resolver.rs
use url::Url;

use crate::application::ports::UrlResolver;
use crate::error::NotifyError;

/// Builds absolute canonical item URLs of the shape
/// `<base>/<langcode>/node/<id>`.
pub struct BaseUrlResolver {
    base: Url,
}

impl BaseUrlResolver {
    pub fn new(base: &str) -> Result<Self, NotifyError> {
        // A trailing slash keeps Url::join from dropping the last path
        // segment of the base.
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };
        let base = Url::parse(&normalized)
            .map_err(|e| NotifyError::Config(format!("invalid base url {:?}: {}", base, e)))?;
        Ok(Self { base })
    }
}

impl UrlResolver for BaseUrlResolver {
    fn canonical_url(&self, item_id: i64, langcode: &str) -> String {
        self.base
            .join(&format!("{}/node/{}", langcode, item_id))
            .map(|url| url.to_string())
            .unwrap_or_else(|_| format!("{}{}/node/{}", self.base, langcode, item_id))
    }
}
