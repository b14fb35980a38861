//! In-memory page source serving a fixed set of pages.

use crate::models::{Listing, RawRow};
use crate::source::{ExtractionError, PageSource, SourceError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct MemorySource {
    pages: Vec<Vec<RawRow>>,
    current: Option<usize>,
    fail_advance_from: Option<usize>,
    reads: AtomicUsize,
    pub advances: usize,
    pub loaded: Vec<Listing>,
}

impl MemorySource {
    pub fn new(pages: Vec<Vec<RawRow>>) -> Self {
        Self {
            pages,
            current: None,
            fail_advance_from: None,
            reads: AtomicUsize::new(0),
            advances: 0,
            loaded: Vec::new(),
        }
    }

    /// Every advance away from page index `page` (0-based) or later errors.
    pub fn failing_advance_from(mut self, page: usize) -> Self {
        self.fail_advance_from = Some(page);
        self
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// `count` rows ranked from `first_rank`, one minute apart, newest first.
    pub fn ordered_rows(first_rank: u32, count: u32) -> Vec<RawRow> {
        (0..count)
            .map(|i| {
                let rank = first_rank + i;
                let minutes_back = i64::from(rank);
                let ts = chrono::DateTime::from_timestamp(1_714_566_896 - 60 * minutes_back, 0)
                    .unwrap()
                    .format("%Y-%m-%dT%H:%M:%S")
                    .to_string();
                RawRow {
                    rank: Some(format!("{}.", rank)),
                    title: Some(format!("Story {}", rank)),
                    link: Some(format!("https://example.com/{}", rank)),
                    age: Some(ts),
                }
            })
            .collect()
    }

    /// Consecutive pages of `page_size` ordered rows, `total` rows overall.
    pub fn paged(total: u32, page_size: u32) -> Self {
        let pages = (0..total.div_ceil(page_size))
            .map(|p| {
                let first = p * page_size + 1;
                MemorySource::ordered_rows(first, page_size.min(total - p * page_size))
            })
            .collect();
        MemorySource::new(pages)
    }
}

#[async_trait]
impl PageSource for MemorySource {
    async fn load_listing(&mut self, listing: &Listing) -> Result<(), SourceError> {
        self.loaded.push(*listing);
        self.current = Some(0);
        Ok(())
    }

    async fn read_rows(&self, max_count: usize) -> Result<Vec<RawRow>, ExtractionError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let index = self.current.ok_or(ExtractionError::NotLoaded)?;
        Ok(self
            .pages
            .get(index)
            .map(|rows| rows.iter().take(max_count).cloned().collect())
            .unwrap_or_default())
    }

    async fn trigger_next_page(&mut self) -> Result<bool, SourceError> {
        let index = self.current.ok_or(SourceError::NotLoaded)?;
        self.advances += 1;
        if self.fail_advance_from.is_some_and(|from| index >= from) {
            return Err(SourceError::NotLoaded);
        }
        if index + 1 >= self.pages.len() {
            return Ok(false);
        }
        self.current = Some(index + 1);
        Ok(true)
    }
}
