//! Interactive command prompt.
//!
//! Each line is parsed with the same argument definitions as the one-shot
//! subcommands, so `newest --limit=45 --verbose=true` behaves identically in
//! both places.

use crate::cli::prompt::Prompt;
use crate::cli::{NewestArgs, PastArgs};
use crate::pipeline::Pipeline;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};

const PROMPT: &str = "> ";

pub const HELP: &str = "\
Commands:
  newest --limit=[1-999] --verbose=false
  past --limit=[1-200] --date=YYYY-MM-DD
  help
  exit";

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_subcommand = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ShellCommand {
    Newest(NewestArgs),
    Past(PastArgs),
    Help,
    #[command(visible_aliases = ["quit", "q"])]
    Exit,
}

/// Parse one input line. The command word is case-insensitive; an empty line
/// asks for help.
pub fn parse_line(line: &str) -> Result<ShellCommand, clap::Error> {
    let mut tokens = line.split_whitespace().map(str::to_string);
    let Some(command) = tokens.next() else {
        return Ok(ShellCommand::Help);
    };
    let argv = std::iter::once(command.to_lowercase()).chain(tokens);
    ShellLine::try_parse_from(argv).map(|l| l.command)
}

/// Run commands until `exit` or end of input. A failing command is reported
/// and the prompt continues.
pub async fn run(pipeline: &Pipeline, prompt: &mut Prompt) -> Result<()> {
    println!("{}", HELP);

    while let Some(line) = prompt.ask(PROMPT).await? {
        let command = match parse_line(&line) {
            Ok(c) => c,
            Err(e) => {
                println!("{}", e.render());
                println!("Type \"help\" for options.");
                continue;
            }
        };

        let result = match command {
            ShellCommand::Help => {
                println!("{}", HELP);
                continue;
            }
            ShellCommand::Exit => break,
            ShellCommand::Newest(args) => pipeline.run_newest(&args, prompt).await.map(|_| ()),
            ShellCommand::Past(args) => pipeline.run_past(&args, prompt).await.map(|_| ()),
        };

        if let Err(e) = result {
            error!("Command failed: {:#}", e);
        }
    }

    info!("Shell closed");
    Ok(())
}
