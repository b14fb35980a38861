use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Entry ─────────────────────────────────────────────────────────────────────

/// One listing row as presented by the site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub rank: Option<u32>,     // None when the rank cell is missing or non-numeric
    pub title: String,
    pub link: Option<String>,  // text-only posts may have none
    pub timestamp: Option<DateTime<Utc>>,
}

impl Entry {
    pub fn rank_ref(&self, position: usize) -> RankRef {
        match self.rank {
            Some(rank) => RankRef::Rank(rank),
            None => RankRef::Unranked { position },
        }
    }
}

/// Names an entry in walk results. An unreadable rank is kept apart from
/// real ranks and carries the 1-based walk position instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankRef {
    Rank(u32),
    Unranked { position: usize },
}

impl fmt::Display for RankRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankRef::Rank(rank) => write!(f, "{}", rank),
            RankRef::Unranked { position } => write!(f, "? (entry {})", position),
        }
    }
}

// ── Raw row ───────────────────────────────────────────────────────────────────

/// Untyped cell contents of one story row plus its metadata sibling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub rank: Option<String>,   // "12."
    pub title: Option<String>,
    pub link: Option<String>,   // already resolved against the page URL
    pub age: Option<String>,    // "2024-05-01T12:34:56 1714566896"
}

// ── Listing target ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Newest,
    Front(NaiveDate),
}

impl Listing {
    /// Path relative to the site root.
    pub fn path(&self) -> String {
        match self {
            Listing::Newest => "newest".to_string(),
            Listing::Front(day) => format!("front?day={}", day.format("%Y-%m-%d")),
        }
    }

    /// Context segment used in report file names.
    pub fn context(&self) -> String {
        match self {
            Listing::Newest => "newest".to_string(),
            Listing::Front(day) => format!("past-{}", day.format("%Y-%m-%d")),
        }
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::Newest => write!(f, "newest listing"),
            Listing::Front(day) => write!(f, "front page for {}", day),
        }
    }
}

// ── Walk results ──────────────────────────────────────────────────────────────

/// How a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    /// The requested number of entries was processed.
    Complete,
    /// A page came back shorter than the nominal page size.
    SourceExhausted,
    /// The next page could not be reached.
    PaginationFailed,
}

impl Completion {
    pub fn is_complete(self) -> bool {
        self == Completion::Complete
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewestOutcome {
    pub all_valid: bool,
    pub processed: usize,
    pub invalid_ranks: Vec<RankRef>,
    pub rank_gaps: Vec<RankRef>,
    pub completion: Completion,
    pub report: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PastOutcome {
    pub date: NaiveDate,
    pub processed: usize,
    pub rank_gaps: Vec<RankRef>,
    pub completion: Completion,
    pub report: Vec<String>,
}
