//! Configuration file handling for the store connection.
//!
//! This module provides loading and parsing of `.csvsql.json` configuration files.
//! The file is optional: without one the store defaults to `sqlite.db` next to
//! the executable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the current and home directories.
pub const CONFIG_FILE_NAME: &str = ".csvsql.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Invalid JSON in {path}: {source}\n\n\
         Examples:\n\
         \n\
         SQLite:\n\
         {{\n  \"database\": {{\n    \"type\": \"sqlite\",\n    \"path\": \"./sqlite.db\"\n  }}\n}}\n\
         \n\
         In-memory:\n\
         {{\n  \"database\": {{\n    \"type\": \"memory\"\n  }}\n}}"
    )]
    Invalid {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Database configuration
    pub database: DatabaseConfigFile,
}

/// Store configuration variants.
///
/// JSON format uses a "type" field with lowercase variant names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DatabaseConfigFile {
    /// SQLite file at `path`, created if absent
    Sqlite { path: PathBuf },
    /// Private in-memory store, discarded when the session ends
    #[serde(rename = "memory")]
    Mem,
}

impl ConfigFile {
    /// Load the configuration from an explicitly named file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file doesn't exist
    /// - The file cannot be read
    /// - The JSON is invalid or required fields are missing
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Invalid {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load the first `.csvsql.json` found in the current directory, then the
    /// home directory. A missing file is not an error.
    pub fn discover() -> Result<Option<Self>, ConfigError> {
        let mut dirs = vec![PathBuf::from(".")];
        if let Some(home_dir) = home::home_dir() {
            dirs.push(home_dir);
        }
        Self::discover_in(&dirs)
    }

    /// Load the first `.csvsql.json` found in `dirs`, in order.
    pub fn discover_in(dirs: &[PathBuf]) -> Result<Option<Self>, ConfigError> {
        for dir in dirs {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "using config file");
                return Self::load_from(&candidate).map(Some);
            }
        }
        Ok(None)
    }

    /// Resolve the configuration for this run: the named file if given,
    /// otherwise whatever [`ConfigFile::discover`] finds.
    pub fn resolve(explicit: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        match explicit {
            Some(path) => Self::load_from(path).map(Some),
            None => Self::discover(),
        }
    }
}
