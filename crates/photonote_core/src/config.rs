//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Locate the note database and the optional log directory.
//! - Keep resolution pure so callers and tests can inject variables.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - Without `PHOTONOTE_DB_PATH` the database lives in the temp directory.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "PHOTONOTE_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "PHOTONOTE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "PHOTONOTE_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "photonote.sqlite3";

const KNOWN_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "warning", "error"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(value) => {
                write!(f, "{LOG_LEVEL_ENV} has unsupported value `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Effective settings for opening the store and starting logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// File logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| read_var(&lookup, name);

        let log_level = match read(LOG_LEVEL_ENV) {
            Some(value) if KNOWN_LEVELS.contains(&value.to_ascii_lowercase().as_str()) => value,
            Some(value) => return Err(ConfigError::InvalidLogLevel(value)),
            None => default_log_level().to_string(),
        };

        Ok(Self {
            db_path: db_path_from_lookup(&lookup),
            log_level,
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        })
    }
}

/// Database location used when nothing is configured.
pub fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

/// Resolves only the database location from the process environment.
///
/// Unlike [`CoreConfig::from_env`] this cannot fail on unrelated variables.
pub fn db_path_from_env() -> PathBuf {
    db_path_from_lookup(|name| std::env::var(name).ok())
}

/// Resolves the database location through `lookup`.
pub fn db_path_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    read_var(&lookup, DB_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(default_db_path)
}

fn read_var(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
