//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::args::CliArgs;
use crate::domain::entities::ApiToken;
use crate::domain::errors::ApiError;
use crate::domain::rows::DEFAULT_TIMESTAMP_FORMAT;

const APP_NAME: &str = "inventree-tui";
const APP_QUALIFIER: &str = "org";
const APP_ORGANIZATION: &str = "inventree";

/// Environment variable holding the server URL.
pub const HOST_ENV: &str = "INVENTREE_API_HOST";
/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "INVENTREE_API_TOKEN";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

/// Application configuration, read from `config.toml` and overridden by CLI.
///
/// The API token is deliberately absent: it only comes from the command line
/// or the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// InvenTree server URL.
    #[serde(default)]
    pub host: Option<String>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum number of part search results.
    #[serde(default = "default_part_search_limit")]
    pub part_search_limit: usize,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Timestamp format string (chrono format).
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Alternate row background colors in tables.
    #[serde(default = "default_true")]
    pub zebra_stripes: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            zebra_stripes: true,
        }
    }
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

fn default_true() -> bool {
    true
}

const fn default_request_timeout() -> u64 {
    30
}

const fn default_part_search_limit() -> usize {
    50
}

/// Resolved connection settings.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Server URL without trailing slash.
    pub host: String,
    /// API token.
    pub token: ApiToken,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(host) = args.host.as_deref().filter(|h| !h.trim().is_empty()) {
            self.host = Some(host.to_string());
        }
        if let Some(timeout) = args.timeout {
            self.request_timeout_secs = timeout;
        }
        if let Some(limit) = args.search_limit {
            self.part_search_limit = limit;
        }
    }

    /// Builds the connection settings.
    ///
    /// # Errors
    /// Returns [`ApiError::MissingConfig`] naming the missing variable.
    pub fn api_settings(&self, token: Option<&str>) -> Result<ApiSettings, ApiError> {
        let host = self
            .host
            .as_deref()
            .map(|h| h.trim().trim_end_matches('/'))
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ApiError::missing_config(HOST_ENV))?;

        let token = token
            .and_then(|t| ApiToken::new(t))
            .ok_or_else(|| ApiError::missing_config(TOKEN_ENV))?;

        Ok(ApiSettings {
            host: host.to_string(),
            token,
            timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
        })
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("inventree-tui.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            host: None,
            log_level: LogLevel::Info,
            request_timeout_secs: default_request_timeout(),
            part_search_limit: default_part_search_limit(),
            ui: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use test_case::test_case;

    #[test_case(LogLevel::Trace, tracing::Level::TRACE ; "trace")]
    #[test_case(LogLevel::Info, tracing::Level::INFO ; "info")]
    #[test_case(LogLevel::Error, tracing::Level::ERROR ; "error")]
    fn test_log_level_maps_to_tracing(level: LogLevel, expected: tracing::Level) {
        assert_eq!(level.to_tracing_level(), expected);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
            host = "https://inventree.example.com/"
            log_level = "debug"
            part_search_limit = 20

            [ui]
            zebra_stripes = false
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.part_search_limit, 20);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.ui.zebra_stripes);
        assert_eq!(config.ui.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(config.host.is_none());
        assert_eq!(config.part_search_limit, 50);
        assert!(config.ui.zebra_stripes);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = AppConfig {
            host: Some("http://file-host".to_string()),
            ..AppConfig::default()
        };
        let args = CliArgs::parse_from([
            "inventree-tui",
            "--host",
            "http://cli-host",
            "--timeout",
            "5",
            "--log-level",
            "warn",
        ]);

        config.merge_with_args(&args);

        assert_eq!(config.host.as_deref(), Some("http://cli-host"));
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_api_settings_trims_host() {
        let config = AppConfig {
            host: Some(" http://localhost:8000/ ".to_string()),
            ..AppConfig::default()
        };

        let settings = config.api_settings(Some("abc123")).unwrap();

        assert_eq!(settings.host, "http://localhost:8000");
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_api_settings_missing_values() {
        let config = AppConfig::default();
        assert_eq!(
            config.api_settings(Some("abc")).unwrap_err(),
            ApiError::missing_config(HOST_ENV)
        );

        let config = AppConfig {
            host: Some("http://localhost".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(
            config.api_settings(Some("  ")).unwrap_err(),
            ApiError::missing_config(TOKEN_ENV)
        );
        assert!(config.api_settings(None).is_err());
    }
}
