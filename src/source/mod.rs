pub mod error;
pub mod hacker_news;
pub mod http_client;
pub mod parsers;

#[cfg(test)]
pub mod memory;

use crate::models::{Listing, RawRow};
use async_trait::async_trait;

pub use self::error::{ExtractionError, SourceError};
pub use self::hacker_news::HackerNewsSource;
pub use self::http_client::HttpClient;

// ── Source trait ──────────────────────────────────────────────────────────────

/// One exclusively-owned page of a listing site.
///
/// The walk only ever talks to this surface, so any driver that can load a
/// listing, read its rows and move to the next batch can stand behind it.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Navigate to the first page of `listing`.
    async fn load_listing(&mut self, listing: &Listing) -> Result<(), SourceError>;

    /// Up to `max_count` story rows of the current page, in presentation order.
    async fn read_rows(&self, max_count: usize) -> Result<Vec<RawRow>, ExtractionError>;

    /// Follow the "More" affordance. `Ok(false)` when the page has none.
    async fn trigger_next_page(&mut self) -> Result<bool, SourceError>;
}
