//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Decide where the slot database and rolling logs live.
//! - Decide which slot key holds the todo list.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never fails; every field has a fallback.

use crate::logging::default_log_level;
use crate::repo::todo_repo::DEFAULT_SLOT_KEY;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "TODOBOARD_DB_PATH";
pub const ENV_SLOT_KEY: &str = "TODOBOARD_SLOT_KEY";
pub const ENV_LOG_LEVEL: &str = "TODOBOARD_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TODOBOARD_LOG_DIR";

const APP_DIR_NAME: &str = "todoboard";
const DB_FILE_NAME: &str = "todoboard.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Resolved storage and logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    pub db_path: PathBuf,
    pub slot_key: String,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl TodoConfig {
    /// Reads `TODOBOARD_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through `lookup`, falling back per field.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let data_dir = default_data_dir();

        Self {
            db_path: read(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join(DB_FILE_NAME)),
            slot_key: read(ENV_SLOT_KEY).unwrap_or_else(|| DEFAULT_SLOT_KEY.to_string()),
            log_level: read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(ENV_LOG_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join(LOG_DIR_NAME)),
        }
    }
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Per-user application data directory, or the temp dir when unknown.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}
