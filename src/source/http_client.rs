use crate::config::SourceConfig;
use crate::source::SourceError;
use anyhow::{Context, Result};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Shared HTTP session. Cheap to clone; every clone reuses the same
/// connection pool and cookie jar.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    request_delay_ms: u64,
    jitter_ms: u64,
}

impl HttpClient {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            inner,
            request_delay_ms: config.request_delay_ms,
            jitter_ms: config.jitter_ms,
        })
    }

    /// Fetch a URL as text after a polite pause. A single attempt; failures
    /// go straight back to the caller.
    pub async fn get_text(&self, url: &str) -> Result<String, SourceError> {
        self.polite_delay().await;
        debug!("GET {}", url);

        let resp = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|source| SourceError::Request { url: url.to_string(), source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status { url: url.to_string(), status });
        }

        resp.text()
            .await
            .map_err(|source| SourceError::Request { url: url.to_string(), source })
    }

    /// Sleep for the configured delay + random jitter.
    async fn polite_delay(&self) {
        let jitter = if self.jitter_ms == 0 {
            0
        } else {
            rand::random_range(0..=self.jitter_ms)
        };
        let total = Duration::from_millis(self.request_delay_ms + jitter);
        if !total.is_zero() {
            sleep(total).await;
        }
    }
}
