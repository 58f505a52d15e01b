//! Configuration system for the Taskboard client.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/taskboard/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::roster::DEFAULT_ROSTER_URL;
use crate::storage::{DEFAULT_STORAGE_KEY, validate_key};
use crate::tasks::MAX_TASK_TITLE_LENGTH;
use crate::view::DEFAULT_QUIET_PERIOD;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// The roster URL is not a valid absolute http(s) URL.
    #[error("invalid roster url {url:?}: {reason}")]
    InvalidRosterUrl {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The storage key cannot name a slot file.
    #[error("invalid storage key {0:?}: must be a plain file name")]
    InvalidStorageKey(String),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    roster: RosterFileConfig,
    storage: StorageFileConfig,
    ui: UiFileConfig,
}

/// `[roster]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct RosterFileConfig {
    url: Option<String>,
    timeout_secs: Option<u64>,
}

/// `[storage]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    data_dir: Option<PathBuf>,
    key: Option<String>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    poll_timeout_ms: Option<u64>,
    search_debounce_ms: Option<u64>,
    max_task_title_len: Option<usize>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -- Roster --
    /// Endpoint returning the user roster as a JSON array.
    pub roster_url: Url,
    /// Request timeout for the roster fetch.
    pub roster_timeout: Duration,

    // -- Storage --
    /// Directory holding the task storage slot.
    pub data_dir: PathBuf,
    /// Name of the task storage slot.
    pub storage_key: String,

    // -- UI --
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,
    /// Quiet period before search text takes effect.
    pub search_debounce: Duration,
    /// Maximum task title length in characters.
    pub max_task_title_len: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            roster_url: default_roster_url(),
            roster_timeout: Duration::from_secs(10),
            data_dir: default_data_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            poll_timeout: Duration::from_millis(50),
            search_debounce: DEFAULT_QUIET_PERIOD,
            max_task_title_len: MAX_TASK_TITLE_LENGTH,
        }
    }
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// CLI args and env vars are parsed via `clap`. If `--config` is given
    /// and the file does not exist, returns an error. If no `--config` is
    /// given, the default path (`~/.config/taskboard/config.toml`) is tried
    /// and silently ignored if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed, or if the resolved roster URL is invalid.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Self::resolve(cli, &file)
    }

    /// Resolve a `ClientConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. This is separated from `load()` to
    /// enable unit testing without CLI parsing.
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let roster_url = match cli.roster_url.as_ref().or(file.roster.url.as_ref()) {
            Some(raw) => parse_roster_url(raw)?,
            None => defaults.roster_url,
        };

        let storage_key = match &file.storage.key {
            Some(key) => {
                validate_key(key).map_err(|_| ConfigError::InvalidStorageKey(key.clone()))?;
                key.clone()
            }
            None => defaults.storage_key,
        };

        Ok(Self {
            roster_url,
            roster_timeout: file
                .roster
                .timeout_secs
                .map_or(defaults.roster_timeout, Duration::from_secs),
            data_dir: cli
                .data_dir
                .clone()
                .or_else(|| file.storage.data_dir.clone())
                .unwrap_or(defaults.data_dir),
            storage_key,
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            search_debounce: file
                .ui
                .search_debounce_ms
                .map_or(defaults.search_debounce, Duration::from_millis),
            max_task_title_len: file
                .ui
                .max_task_title_len
                .unwrap_or(defaults.max_task_title_len),
        })
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal task tracker")]
pub struct CliArgs {
    /// URL of the user roster (JSON array of `{id, name}` records).
    #[arg(long, env = "TASKBOARD_ROSTER_URL")]
    pub roster_url: Option<String>,

    /// Directory where tasks are saved.
    #[arg(long, env = "TASKBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Path to config file (default: `~/.config/taskboard/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKBOARD_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/taskboard.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

#[allow(clippy::expect_used)]
fn default_roster_url() -> Url {
    Url::parse(DEFAULT_ROSTER_URL).expect("default roster url is valid")
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("taskboard")
}

fn parse_roster_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidRosterUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            // No config dir available; use defaults.
            return Ok(ConfigFile::default());
        };
        config_dir.join("taskboard").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
