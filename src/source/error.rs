use thiserror::Error;

/// Failures while fetching or navigating listing pages.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("no page is loaded")]
    NotLoaded,
}

/// DOM-level failures while reading rows. Missing fields never end up here.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("invalid selector {selector:?}: {reason}")]
    Selector {
        selector: &'static str,
        reason: String,
    },

    #[error("no listing table found on {0}")]
    MissingListing(String),

    #[error("no page is loaded")]
    NotLoaded,
}
