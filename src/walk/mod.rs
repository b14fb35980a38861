//! Paginated extraction + order validation engine.
//!
//! A walk loads the first page of a listing and then loops:
//!   1. ask the extractor for `min(NOMINAL_PAGE_SIZE, remaining)` entries
//!   2. check each against the one before it and record a report line
//!   3. stop at the limit, on a short page, or when the next page can't be reached
//!
//! Only the most recent entry is remembered between steps. All state lives in a
//! `WalkState` that is dropped when the walk returns.

pub mod advancer;
pub mod extractor;
pub mod report;
pub mod validator;

use crate::models::{Completion, Entry, Listing, NewestOutcome, PastOutcome, RankRef};
use crate::source::{ExtractionError, PageSource, SourceError};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use self::extractor::EntryExtractor;
use self::report::{LineStyle, ReportCollector};
use self::validator::OrderValidator;

/// Entries the site shows on a full listing page.
pub const NOMINAL_PAGE_SIZE: usize = 30;

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("failed to load the {listing}: {source}")]
    Load {
        listing: Listing,
        #[source]
        source: SourceError,
    },

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Newest-first chronology check.
    Validate,
    /// Plain listing.
    Collect,
}

#[derive(Default)]
struct WalkState {
    processed: usize,
    previous: Option<Entry>,
    invalid_ranks: Vec<RankRef>,
    rank_gaps: Vec<RankRef>,
    report: ReportCollector,
}

impl WalkState {
    fn absorb(&mut self, entry: Entry, mode: Mode, validator: &OrderValidator) {
        let position = self.processed + 1;
        let label = entry.rank_ref(position);

        if let Some(previous) = &self.previous {
            if !validator.rank_follows(previous, &entry) {
                self.rank_gaps.push(label);
            }
        }

        match mode {
            Mode::Validate => {
                if !validator.validate(self.previous.as_ref(), &entry) {
                    self.invalid_ranks.push(label);
                }
                self.report.record(&entry, LineStyle::Timed);
            }
            Mode::Collect => self.report.record(&entry, LineStyle::Plain),
        }

        self.processed = position;
        self.previous = Some(entry);
    }
}

/// One walk over one exclusively borrowed page source.
pub struct PaginatedWalk<'a, S: PageSource + ?Sized> {
    source: &'a mut S,
    verbose: bool,
}

impl<'a, S: PageSource + ?Sized> PaginatedWalk<'a, S> {
    pub fn new(source: &'a mut S, verbose: bool) -> Self {
        Self { source, verbose }
    }

    /// Check that the first `limit` entries of the newest listing run from
    /// newest to oldest.
    pub async fn validate_newest(mut self, limit: usize) -> Result<NewestOutcome, WalkError> {
        let (state, completion) = self.run(Listing::Newest, limit, Mode::Validate).await?;

        let all_valid = completion.is_complete() && state.invalid_ranks.is_empty();
        if !state.invalid_ranks.is_empty() {
            warn!(
                "{} entries out of chronological order: {:?}",
                state.invalid_ranks.len(),
                state.invalid_ranks
            );
        }

        Ok(NewestOutcome {
            all_valid,
            processed: state.processed,
            invalid_ranks: state.invalid_ranks,
            rank_gaps: state.rank_gaps,
            completion,
            report: state.report.into_lines(),
        })
    }

    /// List the first `limit` entries of the front page for `date`. A day with
    /// fewer stories ends the walk early without error.
    pub async fn collect_past_date(
        mut self,
        limit: usize,
        date: NaiveDate,
    ) -> Result<PastOutcome, WalkError> {
        let (state, completion) = self.run(Listing::Front(date), limit, Mode::Collect).await?;

        Ok(PastOutcome {
            date,
            processed: state.processed,
            rank_gaps: state.rank_gaps,
            completion,
            report: state.report.into_lines(),
        })
    }

    async fn run(
        &mut self,
        listing: Listing,
        limit: usize,
        mode: Mode,
    ) -> Result<(WalkState, Completion), WalkError> {
        self.source
            .load_listing(&listing)
            .await
            .map_err(|source| WalkError::Load { listing, source })?;

        let extractor = EntryExtractor;
        let validator = OrderValidator::new(self.verbose);
        let mut state = WalkState::default();
        let mut page = 1u32;

        let completion = loop {
            if state.processed >= limit {
                break Completion::Complete;
            }

            let wanted = NOMINAL_PAGE_SIZE.min(limit - state.processed);
            let batch = extractor.extract(&*self.source, wanted).await?;
            debug!(page, wanted, got = batch.entries.len(), "Extracted batch");

            for entry in batch.entries.into_iter().take(wanted) {
                state.absorb(entry, mode, &validator);
            }

            if state.processed >= limit {
                break Completion::Complete;
            }
            // A short page is the last page, so there is no next page to
            // request even while entries are still wanted.
            if batch.exhausted {
                info!("{} exhausted after {} entries", listing, state.processed);
                break Completion::SourceExhausted;
            }
            if !advancer::advance(&mut *self.source).await {
                warn!(
                    "Stopped on page {} after {} of {} entries",
                    page, state.processed, limit
                );
                break Completion::PaginationFailed;
            }
            page += 1;
        };

        info!(
            processed = state.processed,
            pages = page,
            ?completion,
            "Walk over {} finished",
            listing
        );
        Ok((state, completion))
    }
}
