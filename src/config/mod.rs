use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub mod defaults;
pub mod duration_serde;

use defaults::*;

use crate::discovery::seed::read_seed_file;
use crate::errors::{AppError, AppResult};
use crate::utils::status_code_matcher::is_valid_pattern;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub seeds: SeedsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

/// Network and worker pool settings shared by probing and harvesting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Concurrent probe/harvest tasks per phase
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
    /// Total per-request timeout
    #[serde(default = "default_request_timeout", with = "duration_serde::duration")]
    pub request_timeout: Duration,
    /// Retries on a retryable status, on top of the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base of the exponential backoff: factor * 2^(retry - 1)
    #[serde(default = "default_backoff_factor", with = "duration_serde::duration")]
    pub backoff_factor: Duration,
    /// Upper bound for any single backoff sleep
    #[serde(default = "default_max_backoff", with = "duration_serde::duration")]
    pub max_backoff: Duration,
    /// Status patterns that trigger a retry ("503" or "5xx")
    #[serde(default = "default_retry_status_codes")]
    pub retry_status_codes: Vec<String>,
    #[serde(default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Path and query appended to every candidate address
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,
    #[serde(default = "default_probe_progress_interval")]
    pub probe_progress_interval: usize,
    #[serde(default = "default_harvest_progress_interval")]
    pub harvest_progress_interval: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedsConfig {
    /// Inline seeds, one `scheme://ip:port` per entry
    #[serde(default = "default_seed_urls")]
    pub urls: Vec<String>,
    /// File with one seed per line; replaces `urls` when set
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_ip_list_path")]
    pub ip_list_path: PathBuf,
    #[serde(default = "default_channel_list_path")]
    pub channel_list_path: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Regex rewrites applied after the built-in CCTV aliases
    #[serde(default)]
    pub extra_rules: Vec<RewriteRuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRuleConfig {
    pub pattern: String,
    pub replacement: String,
}

// Scan defaults
fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}

fn default_request_timeout() -> Duration {
    Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS)
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_backoff_factor() -> Duration {
    Duration::from_millis(DEFAULT_BACKOFF_FACTOR_MS)
}

fn default_max_backoff() -> Duration {
    Duration::from_millis(DEFAULT_MAX_BACKOFF_MS)
}

fn default_retry_status_codes() -> Vec<String> {
    DEFAULT_RETRY_STATUS_CODES
        .iter()
        .map(|code| code.to_string())
        .collect()
}

fn default_accept_invalid_certs() -> bool {
    DEFAULT_ACCEPT_INVALID_CERTS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_manifest_path() -> String {
    DEFAULT_MANIFEST_PATH.to_string()
}

fn default_probe_progress_interval() -> usize {
    DEFAULT_PROBE_PROGRESS_INTERVAL
}

fn default_harvest_progress_interval() -> usize {
    DEFAULT_HARVEST_PROGRESS_INTERVAL
}

// Seed defaults
fn default_seed_urls() -> Vec<String> {
    DEFAULT_SEED_URLS.iter().map(|url| url.to_string()).collect()
}

// Output defaults
fn default_ip_list_path() -> PathBuf {
    PathBuf::from(DEFAULT_IP_LIST_PATH)
}

fn default_channel_list_path() -> PathBuf {
    PathBuf::from(DEFAULT_CHANNEL_LIST_PATH)
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            request_timeout: default_request_timeout(),
            max_retries: default_max_retries(),
            backoff_factor: default_backoff_factor(),
            max_backoff: default_max_backoff(),
            retry_status_codes: default_retry_status_codes(),
            accept_invalid_certs: default_accept_invalid_certs(),
            user_agent: default_user_agent(),
            manifest_path: default_manifest_path(),
            probe_progress_interval: default_probe_progress_interval(),
            harvest_progress_interval: default_harvest_progress_interval(),
        }
    }
}

impl Default for SeedsConfig {
    fn default() -> Self {
        Self {
            urls: default_seed_urls(),
            seed_file: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            ip_list_path: default_ip_list_path(),
            channel_list_path: default_channel_list_path(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from_file(&config_file)
    }

    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            Ok(default_config)
        }
    }

    /// Reject settings the scanner cannot run with
    pub fn validate(&self) -> AppResult<()> {
        if self.scan.max_workers == 0 {
            return Err(AppError::configuration("scan.max_workers must be at least 1"));
        }
        if self.scan.request_timeout.is_zero() {
            return Err(AppError::configuration("scan.request_timeout must be non-zero"));
        }
        if !self.scan.manifest_path.starts_with('/') {
            return Err(AppError::configuration(format!(
                "scan.manifest_path must start with '/', got '{}'",
                self.scan.manifest_path
            )));
        }
        if let Some(pattern) = self
            .scan
            .retry_status_codes
            .iter()
            .find(|pattern| !is_valid_pattern(pattern))
        {
            return Err(AppError::configuration(format!(
                "scan.retry_status_codes has invalid entry '{pattern}' (expected e.g. \"503\" or \"5xx\")"
            )));
        }
        Ok(())
    }

    /// Seeds to scan: the seed file when configured, otherwise the inline list
    pub fn resolve_seeds(&self) -> AppResult<Vec<String>> {
        match &self.seeds.seed_file {
            Some(path) => read_seed_file(path),
            None => Ok(self.seeds.urls.clone()),
        }
    }
}
