pub mod prompt;
pub mod shell;

use crate::config::SavePolicy;
use chrono::{Days, NaiveDate};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;

pub const NEWEST_MAX_LIMIT: i64 = 999;
pub const PAST_MAX_LIMIT: i64 = 200;

/// First day the site has a front page for.
pub const EARLIEST_DAY: NaiveDate = match NaiveDate::from_ymd_opt(2007, 2, 19) {
    Some(d) => d,
    None => panic!("invalid earliest day"),
};

#[derive(Parser, Debug)]
#[command(name = "hn-walker", about = "Audit and collect Hacker News listings", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Raise log verbosity (-d debug, -dd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the newest listing runs from newest to oldest
    Newest(NewestArgs),

    /// List the front page of a past day
    Past(PastArgs),

    /// Interactive prompt accepting `newest` / `past` commands
    Shell,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct NewestArgs {
    /// Number of entries to check
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..=NEWEST_MAX_LIMIT))]
    pub limit: u32,

    /// Print every entry and per-pair diagnostics
    #[arg(long, num_args = 0..=1, default_value_t = false, default_missing_value = "true", action = clap::ArgAction::Set)]
    pub verbose: bool,

    /// Save the report without asking (always), skip it (never) or ask
    #[arg(long, value_enum)]
    pub save: Option<SavePolicy>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct PastArgs {
    /// Number of entries to list
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..=PAST_MAX_LIMIT))]
    pub limit: u32,

    /// Day to list, YYYY-MM-DD
    #[arg(long)]
    pub date: NaiveDate,

    /// Print per-entry diagnostics
    #[arg(long, num_args = 0..=1, default_value_t = false, default_missing_value = "true", action = clap::ArgAction::Set)]
    pub verbose: bool,

    /// Save the report without asking (always), skip it (never) or ask
    #[arg(long, value_enum)]
    pub save: Option<SavePolicy>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("{date} is before the first front page ({earliest})", earliest = EARLIEST_DAY)]
    TooEarly { date: NaiveDate },

    #[error("{date} is not in the past (latest allowed: {latest})")]
    NotPast { date: NaiveDate, latest: NaiveDate },
}

/// Accept days from [`EARLIEST_DAY`] through the day before `today`.
pub fn validate_past_date(date: NaiveDate, today: NaiveDate) -> Result<NaiveDate, DateRangeError> {
    let latest = today.checked_sub_days(Days::new(1)).unwrap_or(today);
    if date < EARLIEST_DAY {
        Err(DateRangeError::TooEarly { date })
    } else if date > latest {
        Err(DateRangeError::NotPast { date, latest })
    } else {
        Ok(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_newest_defaults() {
        let cli = Cli::parse_from(["hn-walker", "newest"]);
        let Command::Newest(args) = cli.command else {
            panic!("expected newest");
        };
        assert_eq!(args.limit, 100);
        assert!(!args.verbose);
        assert_eq!(args.save, None);
        assert!(!args.json);
    }

    #[test]
    fn test_newest_flags() {
        let cli = Cli::parse_from([
            "hn-walker", "-dd", "newest", "--limit=45", "--verbose", "--save", "never",
        ]);
        assert_eq!(cli.debug, 2);
        let Command::Newest(args) = cli.command else {
            panic!("expected newest");
        };
        assert_eq!(args.limit, 45);
        assert!(args.verbose);
        assert_eq!(args.save, Some(SavePolicy::Never));

        let cli = Cli::parse_from(["hn-walker", "newest", "--verbose=false"]);
        let Command::Newest(args) = cli.command else {
            panic!("expected newest");
        };
        assert!(!args.verbose);
    }

    #[test]
    fn test_limits_are_bounded() {
        assert!(Cli::try_parse_from(["hn-walker", "newest", "--limit=0"]).is_err());
        assert!(Cli::try_parse_from(["hn-walker", "newest", "--limit=1000"]).is_err());
        assert!(Cli::try_parse_from(["hn-walker", "newest", "--limit=999"]).is_ok());
        assert!(Cli::try_parse_from(["hn-walker", "past", "--limit=201", "--date=2020-01-01"]).is_err());
    }

    #[test]
    fn test_past_requires_valid_date() {
        let cli = Cli::parse_from(["hn-walker", "past", "--limit=12", "--date=2024-01-02"]);
        let Command::Past(args) = cli.command else {
            panic!("expected past");
        };
        assert_eq!(args.limit, 12);
        assert_eq!(args.date, day(2024, 1, 2));

        assert!(Cli::try_parse_from(["hn-walker", "past"]).is_err());
        assert!(Cli::try_parse_from(["hn-walker", "past", "--date=yesterday"]).is_err());
    }

    #[test]
    fn test_validate_past_date() {
        let today = day(2024, 6, 10);
        assert_eq!(validate_past_date(EARLIEST_DAY, today), Ok(EARLIEST_DAY));
        assert_eq!(validate_past_date(day(2024, 6, 9), today), Ok(day(2024, 6, 9)));
        assert_eq!(
            validate_past_date(day(2007, 2, 18), today),
            Err(DateRangeError::TooEarly { date: day(2007, 2, 18) })
        );
        assert_eq!(
            validate_past_date(today, today),
            Err(DateRangeError::NotPast { date: today, latest: day(2024, 6, 9) })
        );
    }
}
