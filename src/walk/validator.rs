use crate::models::Entry;
use tracing::{debug, warn};

/// Emit at `warn` when verbose, `debug` otherwise.
macro_rules! diagnose {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            warn!($($arg)+);
        } else {
            debug!($($arg)+);
        }
    };
}

/// Pure pairwise checks over adjacent entries.
pub struct OrderValidator {
    verbose: bool,
}

impl OrderValidator {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Whether `current` may follow `previous` in a newest-first listing.
    /// The first entry always may.
    pub fn validate(&self, previous: Option<&Entry>, current: &Entry) -> bool {
        previous.is_none_or(|previous| self.chronology_holds(previous, current))
    }

    /// `current.rank == previous.rank + 1`. Diagnostic only.
    pub fn rank_follows(&self, previous: &Entry, current: &Entry) -> bool {
        let follows = match (previous.rank, current.rank) {
            (Some(p), Some(c)) => p.checked_add(1) == Some(c),
            _ => false,
        };
        if !follows {
            diagnose!(
                self.verbose,
                previous = ?previous.rank,
                current = ?current.rank,
                "Rank jump between consecutive entries"
            );
        }
        follows
    }

    fn chronology_holds(&self, previous: &Entry, current: &Entry) -> bool {
        let (Some(prev_ts), Some(cur_ts)) = (previous.timestamp, current.timestamp) else {
            diagnose!(
                self.verbose,
                previous = ?previous.rank,
                current = ?current.rank,
                "Timestamp missing, ordering not checked"
            );
            return true;
        };

        if cur_ts > prev_ts {
            diagnose!(
                self.verbose,
                "Out of order: #{:?} \"{}\" ({}) is newer than #{:?} \"{}\" ({})",
                current.rank, current.title, cur_ts,
                previous.rank, previous.title, prev_ts
            );
            return false;
        }
        true
    }
}
