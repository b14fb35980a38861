//! Command runner: ties page source → walk → report sink together.
//!
//! ## Commands
//!
//! `run_newest()`: open a page on the newest listing, validate the first N
//!   entries newest-to-oldest, print the verdict, offer to save the report.
//!
//! `run_past()`: check the date range, open a page on that day's front page,
//!   list the first N entries, offer to save the report.
//!
//! Every command opens its own page session and drops it before returning,
//! whichever way the command ends.

use crate::cli::prompt::Prompt;
use crate::cli::{validate_past_date, NewestArgs, PastArgs};
use crate::config::{AppConfig, SavePolicy};
use crate::models::{Listing, NewestOutcome, PastOutcome, RankRef};
use crate::output::{decided_by_policy, report_file_name, Confirmation, FileSink};
use crate::source::{HackerNewsSource, HttpClient};
use crate::utils::Stopwatch;
use crate::walk::PaginatedWalk;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

pub struct Pipeline {
    config: AppConfig,
    client: HttpClient,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = HttpClient::new(&config.source).context("Failed to build page client")?;
        Ok(Self { config, client })
    }

    fn open_page(&self) -> Result<HackerNewsSource> {
        HackerNewsSource::open(self.client.clone(), &self.config.source.base_url)
            .with_context(|| format!("Bad base url {:?}", self.config.source.base_url))
    }

    pub async fn run_newest(&self, args: &NewestArgs, prompt: &mut Prompt) -> Result<NewestOutcome> {
        let _t = Stopwatch::start("newest");
        let outcome = {
            let mut page = self.open_page()?;
            PaginatedWalk::new(&mut page, args.verbose)
                .validate_newest(args.limit as usize)
                .await
                .context("Newest walk failed")?
        };

        if args.json {
            print_json(&outcome)?;
        } else {
            print_newest(&outcome, args.limit as usize, args.verbose);
        }

        self.offer_save(&Listing::Newest.context(), &outcome.report, args.save, prompt)
            .await?;
        Ok(outcome)
    }

    pub async fn run_past(&self, args: &PastArgs, prompt: &mut Prompt) -> Result<PastOutcome> {
        let date = validate_past_date(args.date, Utc::now().date_naive())?;

        let _t = Stopwatch::start("past");
        let outcome = {
            let mut page = self.open_page()?;
            PaginatedWalk::new(&mut page, args.verbose)
                .collect_past_date(args.limit as usize, date)
                .await
                .with_context(|| format!("Walk over {} failed", date))?
        };

        if args.json {
            print_json(&outcome)?;
        } else {
            print_past(&outcome);
        }

        self.offer_save(&Listing::Front(date).context(), &outcome.report, args.save, prompt)
            .await?;
        Ok(outcome)
    }

    async fn offer_save(
        &self,
        context: &str,
        lines: &[String],
        save: Option<SavePolicy>,
        prompt: &mut Prompt,
    ) -> Result<Option<PathBuf>> {
        if lines.is_empty() {
            info!("Nothing to save");
            return Ok(None);
        }

        let policy = save.unwrap_or(self.config.report.save);
        let sink = FileSink::new(self.config.report.output_dir.clone());

        let wanted = match decided_by_policy(policy) {
            Some(decision) => decision,
            None => confirm(prompt, &format!("Save {} lines to {:?}? [y/n] ", lines.len(), sink.dir())).await?,
        };
        if !wanted {
            info!("Report discarded");
            return Ok(None);
        }

        let name = report_file_name(context, Utc::now());
        let path = sink.write(&name, lines)?;
        println!("Saved to {}", path.display());
        Ok(Some(path))
    }
}

/// Ask until the answer is yes or no. End of input means no.
async fn confirm(prompt: &mut Prompt, question: &str) -> Result<bool> {
    loop {
        let Some(answer) = prompt.ask(question).await? else {
            return Ok(false);
        };
        match Confirmation::parse(&answer) {
            Confirmation::Yes => return Ok(true),
            Confirmation::No => return Ok(false),
            Confirmation::Other(other) => println!("Please answer y or n (got {:?})", other),
        }
    }
}

fn print_json<T: Serialize>(outcome: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome).context("Failed to encode outcome")?;
    println!("{}", json);
    Ok(())
}

fn join_refs(refs: &[RankRef]) -> String {
    refs.iter().map(RankRef::to_string).collect::<Vec<_>>().join(", ")
}

fn print_newest(outcome: &NewestOutcome, limit: usize, verbose: bool) {
    if verbose {
        for line in &outcome.report {
            println!("{}", line);
        }
    }
    println!("─────────────────────────────────");
    println!("  Newest listing check");
    println!("─────────────────────────────────");
    println!("  Checked    : {} of {}", outcome.processed, limit);
    println!("  Ended      : {:?}", outcome.completion);
    println!("  Sorted     : {}", outcome.all_valid);
    if !outcome.invalid_ranks.is_empty() {
        println!("  Out of order ranks : {}", join_refs(&outcome.invalid_ranks));
    }
    if !outcome.rank_gaps.is_empty() {
        println!("  Rank gaps at       : {}", join_refs(&outcome.rank_gaps));
    }
    println!("─────────────────────────────────");

    if !outcome.completion.is_complete() {
        warn!("Only {} of {} entries could be checked", outcome.processed, limit);
    }
}

fn print_past(outcome: &PastOutcome) {
    for line in &outcome.report {
        println!("{}", line);
    }
    println!("{} entries listed for {} ({:?})", outcome.processed, outcome.date, outcome.completion);
    if !outcome.rank_gaps.is_empty() {
        println!("Rank gaps at: {}", join_refs(&outcome.rank_gaps));
    }
}
