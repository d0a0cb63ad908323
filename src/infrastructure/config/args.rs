use super::app_config::{HOST_ENV, LogLevel, TOKEN_ENV};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "inventree-tui",
    version,
    about = "Terminal UI for InvenTree stock transfers and check-ins",
    long_about = None
)]
/// Command-line arguments.
pub struct CliArgs {
    /// InvenTree server URL.
    #[arg(long, env = HOST_ENV, value_name = "URL")]
    pub host: Option<String>,

    /// InvenTree API token.
    #[arg(long, env = TOKEN_ENV, value_name = "TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// HTTP request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Maximum number of part search results.
    #[arg(long, value_name = "N")]
    pub search_limit: Option<usize>,
}
