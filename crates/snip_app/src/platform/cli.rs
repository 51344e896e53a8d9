//! Command-line surface and configuration resolution.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use snip_engine::{ShortenSettings, DEFAULT_ENDPOINT};
use thiserror::Error;
use url::Url;

use super::logging::LogDestination;

const APP_DIR: &str = "snip";
const HISTORY_FILENAME: &str = "history.json";
const FALLBACK_HISTORY_PATH: &str = ".snip_history.json";
const LOG_FILENAME: &str = "snip.log";

#[derive(Debug, Parser)]
#[command(
    name = "snip",
    version,
    about = "Shorten URLs and keep a local history of the results"
)]
pub struct Cli {
    /// Shortening endpoint that accepts `POST {"url": ...}`.
    #[arg(long, env = "SNIP_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Where the history is stored.
    #[arg(long, env = "SNIP_HISTORY_FILE")]
    pub history_file: Option<PathBuf>,

    /// User-Agent header sent with every request.
    #[arg(long)]
    pub user_agent: Option<String>,

    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log_to: LogTarget,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Shorten one URL and print the result.
    Shorten { url: String },
    /// Print the history, newest first.
    History,
    /// Copy the short URL of a history entry to the clipboard.
    Copy { id: u64 },
    /// Delete a history entry.
    Delete { id: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub endpoint: String,
    pub user_agent: Option<String>,
    pub history_path: PathBuf,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        validate_endpoint(&cli.endpoint)?;

        let history_path = cli
            .history_file
            .clone()
            .unwrap_or_else(default_history_path);
        let log_path = history_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(|parent| parent.join(LOG_FILENAME))
            .unwrap_or_else(|| PathBuf::from(LOG_FILENAME));
        let log_destination = match cli.log_to {
            LogTarget::File => LogDestination::File(log_path),
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both(log_path),
        };
        let log_level = match (cli.quiet, cli.verbose) {
            (true, _) => LevelFilter::Warn,
            (false, 0) => LevelFilter::Info,
            (false, 1) => LevelFilter::Debug,
            (false, _) => LevelFilter::Trace,
        };

        Ok(Self {
            endpoint: cli.endpoint.clone(),
            user_agent: cli.user_agent.clone(),
            history_path,
            log_destination,
            log_level,
        })
    }

    pub fn shorten_settings(&self) -> ShortenSettings {
        let defaults = ShortenSettings::default();
        ShortenSettings {
            endpoint: self.endpoint.clone(),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
        }
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };
    let url = Url::parse(endpoint).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}

fn default_history_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join(HISTORY_FILENAME))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_HISTORY_PATH))
}
