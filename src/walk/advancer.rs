use crate::source::PageSource;
use tracing::{debug, info, warn};

/// Move `source` to its next batch of entries.
///
/// `false` is the only "no more pages" signal: a missing "More" link and a
/// failed navigation both end up here, never as an error.
pub async fn advance<S>(source: &mut S) -> bool
where
    S: PageSource + ?Sized,
{
    match source.trigger_next_page().await {
        Ok(true) => {
            debug!("Advanced to next page");
            true
        }
        Ok(false) => {
            info!("No further pages available");
            false
        }
        Err(e) => {
            warn!("Pagination failed: {}", e);
            false
        }
    }
}
