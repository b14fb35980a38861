//! Report persistence: file naming, writing and the save confirmation.

use crate::config::SavePolicy;
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// `hn-output-<context>-accessed-<ISO timestamp with ':' → '-'>.txt`
pub fn report_file_name(context: &str, accessed_at: DateTime<Utc>) -> String {
    let stamp = accessed_at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace(':', "-");
    format!("hn-output-{}-accessed-{}.txt", context, stamp)
}

/// Answer to "save this report?".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    Other(String),
}

impl Confirmation {
    pub fn parse(answer: &str) -> Self {
        let answer = answer.trim();
        match answer.to_lowercase().as_str() {
            "y" | "yes" => Confirmation::Yes,
            "n" | "no" => Confirmation::No,
            _ => Confirmation::Other(answer.to_string()),
        }
    }
}

/// Writes reports as plain text files under one directory.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// One newline-terminated line per entry. Returns the written path.
    pub fn write(&self, file_name: &str, lines: &[String]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Could not create dir {:?}", self.dir))?;

        let path = self.dir.join(file_name);
        let file = File::create(&path).with_context(|| format!("Could not create {:?}", path))?;
        let mut out = BufWriter::new(file);
        for line in lines {
            writeln!(out, "{}", line).with_context(|| format!("Write to {:?} failed", path))?;
        }
        out.flush().with_context(|| format!("Flush of {:?} failed", path))?;

        info!("Saved {} lines to {:?}", lines.len(), path);
        Ok(path)
    }
}

/// Whether a policy already settles the question without asking.
pub fn decided_by_policy(policy: SavePolicy) -> Option<bool> {
    match policy {
        SavePolicy::Always => Some(true),
        SavePolicy::Never => Some(false),
        SavePolicy::Ask => None,
    }
}
