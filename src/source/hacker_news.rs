use crate::models::{Listing, RawRow};
use crate::source::parsers::{find_more_link, parse_rows};
use crate::source::{ExtractionError, HttpClient, PageSource, SourceError};
use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

struct LoadedPage {
    url: Url,
    html: String,
    number: u32,
}

/// A single page session against the listing site.
///
/// The site serves static markup, so a page is just the last fetched
/// document; following "More" replaces it. Dropping the source closes it.
pub struct HackerNewsSource {
    client: HttpClient,
    base_url: Url,
    page: Option<LoadedPage>,
}

impl HackerNewsSource {
    pub fn open(client: HttpClient, base_url: &str) -> Result<Self, SourceError> {
        // Keep the trailing slash so relative joins stay under the base.
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
        debug!("Opened page session on {}", base_url);
        Ok(Self { client, base_url, page: None })
    }

    async fn navigate(&mut self, url: Url, number: u32) -> Result<(), SourceError> {
        info!("Fetching page {} ({})", number, url);
        let html = self.client.get_text(url.as_str()).await?;
        self.page = Some(LoadedPage { url, html, number });
        Ok(())
    }
}

#[async_trait]
impl PageSource for HackerNewsSource {
    async fn load_listing(&mut self, listing: &Listing) -> Result<(), SourceError> {
        let url = self.base_url.join(&listing.path())?;
        self.navigate(url, 1).await
    }

    async fn read_rows(&self, max_count: usize) -> Result<Vec<RawRow>, ExtractionError> {
        let page = self.page.as_ref().ok_or(ExtractionError::NotLoaded)?;
        parse_rows(&page.html, &page.url, max_count)
    }

    async fn trigger_next_page(&mut self) -> Result<bool, SourceError> {
        let page = self.page.as_ref().ok_or(SourceError::NotLoaded)?;
        let Some(next) = find_more_link(&page.html, &page.url) else {
            debug!("Page {} has no \"More\" link", page.number);
            return Ok(false);
        };
        let number = page.number + 1;
        self.navigate(next, number).await?;
        Ok(true)
    }
}

impl Drop for HackerNewsSource {
    fn drop(&mut self) {
        if let Some(page) = &self.page {
            debug!("Closed page session after {} page(s)", page.number);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceConfig;
    use tokio_test::assert_err;

    fn source() -> HackerNewsSource {
        let client = HttpClient::new(&SourceConfig::default()).unwrap();
        HackerNewsSource::open(client, "https://news.ycombinator.com/").unwrap()
    }

    #[test]
    fn test_base_url_normalised() {
        let src = source();
        assert_eq!(src.base_url.as_str(), "https://news.ycombinator.com/");
        assert_eq!(
            src.base_url.join(&Listing::Newest.path()).unwrap().as_str(),
            "https://news.ycombinator.com/newest"
        );
    }

    #[tokio::test]
    async fn test_unloaded_page_refuses_reads() {
        let mut src = source();
        assert!(matches!(
            src.read_rows(30).await,
            Err(ExtractionError::NotLoaded)
        ));
        assert_err!(src.trigger_next_page().await);
    }
}
