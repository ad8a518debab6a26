// src/aggregate/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_CONFIG_PATH: &str = "EXTERNAL_JOBS_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config/providers.toml";

pub const DEFAULT_FINDWORK_URL: &str = "https://findwork.dev/api/jobs/";
pub const DEFAULT_ARBEITNOW_URL: &str = "https://arbeitnow.com/api/job-board-api";
pub const DEFAULT_REMOTIVE_URL: &str = "https://remotive.com/api/remote-jobs";
pub const DEFAULT_PLACEHOLDER_LOGO: &str = "/placeholder-logo.png";

// Obvious non-credential so local development works out of the box.
// Real keys come from FINDWORK_API_KEY or the config file.
const DEFAULT_FINDWORK_KEY: &str = "dev-placeholder-token";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Provider endpoints and credentials, injected into adapters at
/// construction. Resolution order: built-in defaults, then an optional
/// TOML file, then per-field environment overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorConfig {
    pub findwork_url: String,
    pub findwork_api_key: String,
    pub arbeitnow_url: String,
    pub remotive_url: String,
    pub placeholder_logo: String,
    pub timeout: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            findwork_url: DEFAULT_FINDWORK_URL.to_string(),
            findwork_api_key: DEFAULT_FINDWORK_KEY.to_string(),
            arbeitnow_url: DEFAULT_ARBEITNOW_URL.to_string(),
            remotive_url: DEFAULT_REMOTIVE_URL.to_string(),
            placeholder_logo: DEFAULT_PLACEHOLDER_LOGO.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    findwork_url: Option<String>,
    findwork_api_key: Option<String>,
    arbeitnow_url: Option<String>,
    remotive_url: Option<String>,
    placeholder_logo: Option<String>,
    timeout_secs: Option<u64>,
}

impl AggregatorConfig {
    /// Load config using env var + fallbacks:
    /// 1) $EXTERNAL_JOBS_CONFIG_PATH (must exist when set)
    /// 2) config/providers.toml if present
    /// 3) built-in defaults
    /// Environment overrides are applied on top of whatever loaded.
    pub fn load() -> Result<Self> {
        let file = load_file_config()?;
        Ok(Self::default().apply_file(file).apply_env())
    }

    /// Build the shared HTTP client all adapters use. The timeout bounds
    /// every upstream call; a timed-out provider counts as failed.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(concat!("applitrak-aggregator/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .build()
            .context("building shared http client")
    }

    fn apply_file(mut self, file: FileConfig) -> Self {
        if let Some(v) = file.findwork_url {
            self.findwork_url = v;
        }
        if let Some(v) = file.findwork_api_key {
            self.findwork_api_key = v;
        }
        if let Some(v) = file.arbeitnow_url {
            self.arbeitnow_url = v;
        }
        if let Some(v) = file.remotive_url {
            self.remotive_url = v;
        }
        if let Some(v) = file.placeholder_logo {
            self.placeholder_logo = v;
        }
        if let Some(v) = file.timeout_secs {
            self.timeout = Duration::from_secs(v);
        }
        self
    }

    fn apply_env(mut self) -> Self {
        if let Ok(v) = std::env::var("FINDWORK_API_URL") {
            self.findwork_url = v;
        }
        if let Ok(v) = std::env::var("FINDWORK_API_KEY") {
            self.findwork_api_key = v;
        }
        if let Ok(v) = std::env::var("ARBEITNOW_API_URL") {
            self.arbeitnow_url = v;
        }
        if let Ok(v) = std::env::var("REMOTIVE_API_URL") {
            self.remotive_url = v;
        }
        if let Ok(v) = std::env::var("PLACEHOLDER_LOGO_PATH") {
            self.placeholder_logo = v;
        }
        if let Some(secs) = std::env::var("EXTERNAL_JOBS_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }
}

fn load_file_config() -> Result<FileConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        // An explicitly named file must load; a broken path is a real error.
        return read_file_config(&PathBuf::from(p));
    }
    let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        return read_file_config(&default_path);
    }
    Ok(FileConfig::default())
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading provider config from {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("parsing provider config from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_config_overlays_only_present_fields() {
        let file: FileConfig = toml::from_str(
            r#"
            findwork_api_key = "file-key"
            timeout_secs = 3
            "#,
        )
        .unwrap();
        let cfg = AggregatorConfig::default().apply_file(file);
        assert_eq!(cfg.findwork_api_key, "file-key");
        assert_eq!(cfg.timeout, Duration::from_secs(3));
        assert_eq!(cfg.findwork_url, DEFAULT_FINDWORK_URL);
    }

    #[test]
    fn default_key_is_an_obvious_placeholder() {
        let cfg = AggregatorConfig::default();
        assert_eq!(cfg.findwork_api_key, "dev-placeholder-token");
    }
}
