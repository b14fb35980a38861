use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Listing site / HTTP configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    #[serde(default = "default_jitter_ms")]
    pub jitter_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Report persistence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub save: SavePolicy,
}

/// What to do with a finished report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SavePolicy {
    #[default]
    Ask,
    Always,
    Never,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_base_url() -> String {
    "https://news.ycombinator.com".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_request_delay_ms() -> u64 {
    250
}
fn default_jitter_ms() -> u64 {
    100
}
fn default_user_agent() -> String {
    "hn-walker/0.1 (listing order audit)".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            request_delay_ms: default_request_delay_ms(),
            jitter_ms: default_jitter_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            save: SavePolicy::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from file + environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(config::Environment::with_prefix("HN").separator("__"))
            .build()?;

        match cfg.try_deserialize::<AppConfig>() {
            Ok(app_cfg) => Ok(app_cfg),
            Err(e) => {
                warn!("Ignoring unusable configuration ({}), using defaults", e);
                Ok(AppConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg = config::Config::builder()
            .add_source(config::File::from_str(
                "[report]\nsave = \"never\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let app: AppConfig = cfg.try_deserialize().unwrap();

        assert_eq!(app.report.save, SavePolicy::Never);
        assert_eq!(app.report.output_dir, PathBuf::from("output"));
        assert_eq!(app.source.base_url, "https://news.ycombinator.com");
    }

    #[test]
    fn test_empty_config_is_default() {
        let cfg = config::Config::builder().build().unwrap();
        let app: AppConfig = cfg.try_deserialize().unwrap();
        assert_eq!(app.source.timeout_secs, 30);
        assert_eq!(app.report.save, SavePolicy::Ask);
    }

    #[test]
    fn test_stale_page_size_setting_is_ignored() {
        // page size is a property of the site, not a setting
        let cfg = config::Config::builder()
            .add_source(config::File::from_str(
                "[walk]\npage_size = 20\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let app: AppConfig = cfg.try_deserialize().unwrap();
        assert_eq!(app.report.save, SavePolicy::Ask);
    }
}
