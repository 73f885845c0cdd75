// src/config.rs
//! Unified configuration: defaults, optional TOML file, env overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_OUTPUT_DIR: &str = "exports";
const CONFIG_FILE: &str = "talentscout.toml";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the backend collaborators.
    pub api_url: String,
    /// Per-request timeout for every collaborator call.
    pub timeout_secs: u64,
    /// Where CSV exports are written.
    pub output_dir: PathBuf,
    /// Task-list URL used by the list export, when configured.
    pub clickup_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_url: Option<String>,
    timeout_secs: Option<u64>,
    output_dir: Option<PathBuf>,
    clickup_url: Option<String>,
}

impl AppConfig {
    /// Load configuration: built-in defaults, overridden by an optional
    /// `talentscout.toml` in the working directory, overridden by
    /// `TALENTSCOUT_*` environment variables.
    pub fn load() -> Result<Self> {
        let file = load_file(&PathBuf::from(CONFIG_FILE))?;
        from_sources(file, |key| std::env::var(key).ok())
    }
}

fn load_file(path: &PathBuf) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    info!("Loading configuration file: {}", path.display());
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<AppConfig> {
    let api_url = env("TALENTSCOUT_API_URL")
        .or(file.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let timeout_secs = match env("TALENTSCOUT_TIMEOUT_SECS") {
        Some(raw) => raw
            .parse::<u64>()
            .context("TALENTSCOUT_TIMEOUT_SECS must be a number of seconds")?,
        None => file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
    };

    let output_dir = env("TALENTSCOUT_OUTPUT_DIR")
        .map(PathBuf::from)
        .or(file.output_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let clickup_url = env("TALENTSCOUT_CLICKUP_URL").or(file.clickup_url);

    Ok(AppConfig {
        api_url,
        timeout_secs,
        output_dir,
        clickup_url,
    })
}
