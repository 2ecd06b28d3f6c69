//! Configuration structures and loading logic.

use crate::api::{SessionCookies, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub rate: RateConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Session credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountConfig {
    /// File holding a `k=v; k2=v2` cookie line.
    #[serde(default)]
    pub cookie_file: Option<PathBuf>,

    /// Inline cookie line; takes precedence over `cookie_file`.
    #[serde(default)]
    pub cookie: Option<String>,
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Web origin for pages and JSON endpoints.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Browser user agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Pacing and retry settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateConfig {
    /// Pause between pages and between collections, in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Pause after every `batch_size` collections, in milliseconds.
    #[serde(default = "default_batch_pause_ms")]
    pub batch_pause_ms: u64,

    /// Number of collections between batch pauses.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Attempts per item page before giving up on a collection.
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Fixed wait between attempts, in seconds.
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            batch_pause_ms: default_batch_pause_ms(),
            batch_size: default_batch_size(),
            retries: default_retries(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }
}

impl RateConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn batch_pause(&self) -> Duration {
        Duration::from_millis(self.batch_pause_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    /// No pauses at all, for driving the scraper against scripted responses.
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            interval_ms: 0,
            batch_pause_ms: 0,
            batch_size: 10,
            retries: 3,
            retry_delay_secs: 0,
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write the report here instead of stdout.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Indent the JSON report.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            pretty: true,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_interval_ms() -> u64 {
    300
}

fn default_batch_pause_ms() -> u64 {
    1000
}

fn default_batch_size() -> usize {
    10
}

fn default_retries() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Resolve the session cookies from the inline value or the cookie file.
    pub fn session_cookies(&self) -> Result<SessionCookies> {
        if let Some(raw) = &self.account.cookie {
            return Ok(SessionCookies::parse(raw.trim()));
        }

        match &self.account.cookie_file {
            Some(path) => SessionCookies::load(path),
            None => Ok(SessionCookies::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://www.tiktok.com");
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.rate.interval(), Duration::from_millis(300));
        assert_eq!(config.rate.batch_pause(), Duration::from_secs(1));
        assert_eq!(config.rate.batch_size, 10);
        assert_eq!(config.rate.retries, 3);
        assert_eq!(config.rate.retry_delay(), Duration::from_secs(5));
        assert!(config.output.pretty);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[rate]
interval_ms = 500
retries = 5

[output]
path = "out.json"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.rate.interval_ms, 500);
        assert_eq!(config.rate.retries, 5);
        assert_eq!(config.rate.batch_size, 10);
        assert_eq!(config.output.path, Some(PathBuf::from("out.json")));
        assert_eq!(config.api.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let config = Config::load_or_default(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[rate\ninterval_ms = ").unwrap();
        assert!(matches!(
            Config::load(file.path()).unwrap_err(),
            Error::TomlParse(_)
        ));
    }

    #[test]
    fn test_inline_cookie_wins_over_file() {
        let mut config = Config::default();
        config.account.cookie = Some("sessionid=inline".into());
        config.account.cookie_file = Some(PathBuf::from("/nonexistent/cookies.txt"));

        let cookies = config.session_cookies().unwrap();
        assert_eq!(cookies.get("sessionid"), Some("inline"));
    }

    #[test]
    fn test_no_cookies_configured() {
        assert!(Config::default().session_cookies().unwrap().is_empty());
    }
}
