use crate::models::{Entry, RawRow};
use crate::source::{ExtractionError, PageSource};
use super::NOMINAL_PAGE_SIZE;
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, warn};

// ── Field parsers ─────────────────────────────────────────────────────────────

/// "12." → 12. Zero, negatives and junk are unreadable.
pub fn parse_rank(s: &str) -> Option<u32> {
    s.trim()
        .trim_end_matches('.')
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|r| *r > 0)
}

// Unix fallback ignores anything before 2001.
const EARLIEST_UNIX_SECS: i64 = 1_000_000_000;

/// Parse the age tooltip: "2024-05-01T12:34:56 1714566896".
/// The ISO part is UTC; the unix seconds are the fallback.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let mut parts = s.split_whitespace();
    let first = parts.next()?;

    if let Ok(naive) = NaiveDateTime::parse_from_str(first, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(first) {
        return Some(dt.with_timezone(&Utc));
    }
    std::iter::once(first)
        .chain(parts)
        .filter_map(|p| p.parse::<i64>().ok())
        .filter(|secs| *secs >= EARLIEST_UNIX_SECS)
        .find_map(|secs| DateTime::from_timestamp(secs, 0))
}

pub fn row_to_entry(row: RawRow) -> Entry {
    let rank = row.rank.as_deref().and_then(parse_rank);
    if rank.is_none() {
        warn!("Unreadable rank {:?}", row.rank);
    }

    let title = match row.title.map(|t| t.trim().to_string()) {
        Some(t) if !t.is_empty() => t,
        _ => {
            warn!("Entry {:?} has no title", rank);
            "(untitled)".to_string()
        }
    };

    let link = row.link.filter(|l| !l.trim().is_empty());
    if link.is_none() {
        debug!("Entry {:?} has no link", rank);
    }

    let timestamp = row.age.as_deref().and_then(parse_timestamp);
    if timestamp.is_none() {
        debug!("Entry {:?} has no usable timestamp ({:?})", rank, row.age);
    }

    Entry { rank, title, link, timestamp }
}

// ── Extractor ─────────────────────────────────────────────────────────────────

/// Entries read from one page.
#[derive(Debug)]
pub struct Extraction {
    pub entries: Vec<Entry>,
    /// Fewer rows than both the request and the nominal page size:
    /// nothing follows this page.
    pub exhausted: bool,
}

pub struct EntryExtractor;

impl EntryExtractor {
    /// Read up to `max_count` entries from the current page. Never mutates it.
    pub async fn extract<S>(&self, source: &S, max_count: usize) -> Result<Extraction, ExtractionError>
    where
        S: PageSource + ?Sized,
    {
        let rows = source.read_rows(max_count).await?;
        let entries: Vec<Entry> = rows
            .into_iter()
            .take(max_count)
            .map(row_to_entry)
            .collect();

        if entries.len() < max_count {
            warn!(
                requested = max_count,
                extracted = entries.len(),
                "Page returned fewer entries than requested"
            );
        }

        let exhausted = entries.len() < max_count && entries.len() < NOMINAL_PAGE_SIZE;
        Ok(Extraction { entries, exhausted })
    }
}
