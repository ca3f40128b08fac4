//! Runtime settings for quotebook front ends.
//!
//! Front ends collect raw values (flags, environment) and pass them through
//! the parsers here, so every entry point applies the same rules the logging
//! bootstrap enforces.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "QUOTEBOOK_DB";
pub const LOG_LEVEL_ENV: &str = "QUOTEBOOK_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "QUOTEBOOK_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "quotebook.sqlite3";

/// Rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub setting: &'static str,
    pub message: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.setting, self.message)
    }
}

impl Error for ConfigError {}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Canonical log level name.
    pub log_level: &'static str,
    /// Absolute log directory; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

/// Parses a log level name (`warning` is accepted as `warn`).
pub fn parse_log_level(value: &str) -> Result<&'static str, ConfigError> {
    normalize_level(value).map_err(|message| ConfigError {
        setting: "log level",
        message,
    })
}

/// Parses a log directory, which must be absolute.
pub fn parse_log_dir(value: &str) -> Result<PathBuf, ConfigError> {
    normalize_log_dir(Path::new(value.trim())).map_err(|message| ConfigError {
        setting: "log directory",
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_log_dir, parse_log_level, CoreConfig, DEFAULT_DB_FILE_NAME};
    use std::path::PathBuf;

    #[test]
    fn default_config_uses_local_db_and_no_log_dir() {
        let config = CoreConfig::default();
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE_NAME));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn log_level_is_normalized() {
        assert_eq!(parse_log_level("WARNING").unwrap(), "warn");
        let err = parse_log_level("loud").unwrap_err();
        assert_eq!(err.setting, "log level");
    }

    #[test]
    fn log_dir_must_be_absolute() {
        let dir = std::env::temp_dir().join("quotebook-logs");
        assert_eq!(parse_log_dir(dir.to_str().unwrap()).unwrap(), dir);

        let err = parse_log_dir("relative/logs").unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }
}
