//! Client configuration
//!
//! Resolves the API endpoint and report-flow options from, in priority order:
//! 1. an explicit value (the `--api-url` flag)
//! 2. `CAMPUS_FIX_API_URL` environment variable
//! 3. `<config dir>/campus-fix/config.json`
//! 4. the built-in default endpoint

use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Built-in API endpoint
pub const DEFAULT_API_URL: &str =
    "https://pbxye9l79b.execute-api.ap-southeast-1.amazonaws.com/prod";

/// Environment variable overriding the API endpoint
pub const API_URL_ENV: &str = "CAMPUS_FIX_API_URL";

/// Environment variable toggling image analysis (`0`/`false` disables it)
pub const ANALYSIS_ENV: &str = "CAMPUS_FIX_ANALYSIS";

/// How long the confirmation stays up before moving to the issue list
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Where the API endpoint came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Command line flag
    Flag,
    /// Environment variable
    EnvVar,
    /// Config file
    File,
    /// Built-in default
    Default,
}

/// Resolved client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote API
    pub api_url: Url,
    /// Whether to run image analysis after upload
    pub analysis: bool,
    /// Delay between a successful report and showing the issue list
    pub redirect_delay: Duration,
    /// Where `api_url` came from
    pub source: ConfigSource,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    api_url: Option<String>,
    analysis: Option<bool>,
}

impl Config {
    /// Configuration pointing at `api_url` with default options
    pub fn new(api_url: &str) -> Result<Self> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            analysis: true,
            redirect_delay: REDIRECT_DELAY,
            source: ConfigSource::Flag,
        })
    }

    /// Enable or disable the analysis step
    #[must_use]
    pub const fn with_analysis(mut self, analysis: bool) -> Self {
        self.analysis = analysis;
        self
    }

    /// Override the post-submit redirect delay
    #[must_use]
    pub const fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    /// Resolve configuration using the default config file location
    pub fn resolve(flag: Option<&str>) -> Result<Self> {
        Self::resolve_with_file(flag, default_config_path().as_deref())
    }

    /// Resolve configuration reading an explicit config file path
    pub fn resolve_with_file(flag: Option<&str>, file: Option<&Path>) -> Result<Self> {
        let file_config = match file {
            Some(path) if path.exists() => read_config_file(path)?,
            _ => ConfigFile::default(),
        };

        let (raw_url, source) = if let Some(url) = flag {
            (url.to_string(), ConfigSource::Flag)
        } else if let Ok(url) = env::var(API_URL_ENV) {
            (url, ConfigSource::EnvVar)
        } else if let Some(url) = file_config.api_url.clone() {
            (url, ConfigSource::File)
        } else {
            (DEFAULT_API_URL.to_string(), ConfigSource::Default)
        };

        let analysis = match env::var(ANALYSIS_ENV) {
            Ok(value) => parse_toggle(&value)?,
            Err(_) => file_config.analysis.unwrap_or(true),
        };

        tracing::debug!(url = %raw_url, ?source, analysis, "resolved configuration");

        Ok(Self {
            api_url: parse_api_url(&raw_url)?,
            analysis,
            redirect_delay: REDIRECT_DELAY,
            source,
        })
    }

    /// Base URL without a trailing slash, for joining paths onto
    pub fn base_url(&self) -> String {
        self.api_url.as_str().trim_end_matches('/').to_string()
    }
}

/// Default config file location (`<config dir>/campus-fix/config.json`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("campus-fix").join("config.json"))
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
}

fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("invalid API URL {raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::Config(format!(
            "API URL must be http or https, got {other}"
        ))),
    }
}

fn parse_toggle(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!("{ANALYSIS_ENV} must be a boolean, got {other}"))),
    }
}
