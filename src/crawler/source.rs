//! The fetch/parse port used by the coordinator
//!
//! The coordinator never talks to the network directly. Everything it knows
//! about a page comes through a [`PageSource`], which lets tests drive the
//! crawl with an in-memory web.

use crate::FetchError;
use async_trait::async_trait;

/// Fetches pages and extracts their outbound links
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the raw content of `url`
    ///
    /// Each call carries its own timeout. Timeouts, transport failures and
    /// non-success statuses are reported as distinct [`FetchError`]s.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;

    /// Extracts absolute outbound links from fetched content
    ///
    /// References are resolved against `base_url`; references that cannot be
    /// resolved are silently dropped.
    fn extract_links(&self, content: &str, base_url: &str) -> Vec<String>;
}
