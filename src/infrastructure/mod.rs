//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// InvenTree API client.
pub mod inventree;

pub use config::{ApiSettings, AppConfig, CliArgs, LogLevel, StorageManager};
pub use inventree::InvenTreeClient;
