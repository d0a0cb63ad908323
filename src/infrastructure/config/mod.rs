//! Application configuration.

/// Configuration file model and settings.
pub mod app_config;
/// Command-line arguments.
pub mod args;
/// Configuration file storage.
pub mod storage;

pub use app_config::{ApiSettings, AppConfig, HOST_ENV, LogLevel, TOKEN_ENV, UiConfig};
pub use args::CliArgs;
pub use storage::{ConfigError, StorageManager};
