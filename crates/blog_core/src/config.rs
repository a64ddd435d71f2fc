//! Core configuration loaded from JSON.
//!
//! ```json
//! {
//!   "database_path": "/var/lib/blog/blog.db",
//!   "logging": { "level": "info", "log_dir": "/var/log/blog" },
//!   "post_rules": { "clickbait_markers": ["Top", "Secret"] }
//! }
//! ```
//!
//! Every section is optional. Without `database_path` the store is an
//! in-memory database.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::LoggingConfig;
use crate::validate::post::{PostRules, PostRulesError, PostValidator};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(PostRulesError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Root configuration for the blog core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    pub database_path: Option<PathBuf>,
    pub logging: Option<LoggingConfig>,
    pub post_rules: PostRules,
}

impl CoreConfig {
    /// Parses and checks a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.post_rules.check().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Opens the configured database, or an in-memory one when unset.
    pub fn open_db(&self) -> DbResult<Connection> {
        match self.database_path.as_deref() {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }

    /// Builds a post validator over the configured rules.
    pub fn post_validator(&self) -> PostValidator {
        PostValidator::new(self.post_rules.clone())
    }
}
