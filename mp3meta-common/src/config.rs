//! Configuration loading and settings resolution
//!
//! Every setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error: the loader falls back to
//! defaults. A TOML file that exists but fails to parse is a configuration error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Environment variable naming the music directory to ingest
pub const ENV_MUSIC_DIR: &str = "MP3META_MUSIC_DIR";
/// Environment variable naming the SQLite database file
pub const ENV_DATABASE: &str = "MP3META_DATABASE";
/// Environment variable selecting the sink error policy
pub const ENV_ON_SINK_ERROR: &str = "MP3META_ON_SINK_ERROR";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Top directory of the MP3 library
    #[serde(default)]
    pub music_dir: Option<PathBuf>,

    /// Path to SQLite database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Ingestion behavior (optional)
    #[serde(default)]
    pub ingest: IngestConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Ingestion configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngestConfig {
    /// What to do when the sink rejects a record
    #[serde(default)]
    pub on_sink_error: SinkErrorPolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Behavior when a record cannot be written to the sink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkErrorPolicy {
    /// Stop the run on the first sink failure
    #[default]
    Abort,
    /// Log the failure, count it and continue with the next file
    Skip,
}

impl FromStr for SinkErrorPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(Error::InvalidInput(format!(
                "unknown sink error policy '{}' (expected 'abort' or 'skip')",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SinkErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Abort => f.write_str("abort"),
            Self::Skip => f.write_str("skip"),
        }
    }
}

impl TomlConfig {
    /// Load TOML config from `path`
    ///
    /// Returns defaults when the file does not exist; reporting that is left to
    /// the caller, since this usually runs before logging is set up.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read TOML failed: {}", e)))?;
        let config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;

        debug!("Loaded config file: {}", path.display());
        Ok(config)
    }
}

/// Values supplied on the command line; `None` means "not given"
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub music_dir: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub on_sink_error: Option<SinkErrorPolicy>,
}

/// Fully resolved settings for one ingestion run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub music_dir: PathBuf,
    pub database_path: PathBuf,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub on_sink_error: SinkErrorPolicy,
}

impl Settings {
    /// Resolve settings from CLI overrides, environment and TOML config
    pub fn resolve(overrides: Overrides, toml_config: TomlConfig) -> Result<Self> {
        let music_dir = overrides
            .music_dir
            .or_else(|| env_path(ENV_MUSIC_DIR))
            .or(toml_config.music_dir)
            .ok_or_else(|| {
                Error::Config(format!(
                    "Music directory not configured. Use --music-dir, {} or `music_dir` in the config file",
                    ENV_MUSIC_DIR
                ))
            })?;

        let database_path = overrides
            .database_path
            .or_else(|| env_path(ENV_DATABASE))
            .or(toml_config.database_path)
            .unwrap_or_else(default_database_path);

        let on_sink_error = match overrides.on_sink_error {
            Some(policy) => policy,
            None => match std::env::var(ENV_ON_SINK_ERROR) {
                Ok(value) => value.parse()?,
                Err(_) => toml_config.ingest.on_sink_error,
            },
        };

        let log_level = overrides
            .log_level
            .unwrap_or(toml_config.logging.level);

        Ok(Self {
            music_dir,
            database_path,
            log_level,
            log_file: toml_config.logging.file,
            on_sink_error,
        })
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Default config file location: `<config_dir>/mp3meta/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("mp3meta").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("mp3meta.toml"))
}

/// Default database location: `<data_local_dir>/mp3meta/mp3meta.db`
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("mp3meta").join("mp3meta.db"))
        .unwrap_or_else(|| PathBuf::from("./mp3meta_data/mp3meta.db"))
}
