mod cli;
mod config;
mod models;
mod output;
mod pipeline;
mod source;
mod utils;
mod walk;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::prompt::Prompt;
use crate::cli::{shell, Cli, Command};
use crate::config::AppConfig;
use crate::pipeline::Pipeline;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.debug {
        0 => "hn_walker=info,warn",
        1 => "hn_walker=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let config = AppConfig::load()?;
    let pipeline = Pipeline::new(config)?;
    let mut prompt = Prompt::stdin();

    match cli.command {
        Command::Newest(args) => {
            let outcome = pipeline.run_newest(&args, &mut prompt).await?;
            info!(
                "Done: {} entries, all valid: {}",
                outcome.processed, outcome.all_valid
            );
        }

        Command::Past(args) => {
            let outcome = pipeline.run_past(&args, &mut prompt).await?;
            info!("Done: {} entries for {}", outcome.processed, outcome.date);
        }

        Command::Shell => {
            shell::run(&pipeline, &mut prompt).await?;
        }
    }

    Ok(())
}
