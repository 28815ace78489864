//! CLI argument definitions.
//!
//! The tool has no subcommands: every command is typed at the interactive
//! prompt. The flags only choose the store and how command summaries render.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{ConfigFile, DatabaseConfigFile};
use crate::output::OutputFormat;

/// File name of the store created next to the executable.
pub const DEFAULT_DB_FILE: &str = "sqlite.db";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
At the prompt, enter one of:
  import        Load a CSV file into a new table
  export        Write the full result of the most recent query to a CSV file
  <SQL>         Run a SQL statement and preview its result
")]
pub struct Args {
    /// Path to the SQLite database file
    ///
    /// If not specified, uses the database named in the config file, else
    /// sqlite.db next to the csvsql executable (created if absent).
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Path to a JSON config file
    ///
    /// If not specified, searches for .csvsql.json in:
    ///   1. the current directory
    ///   2. the home directory
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format for command summaries
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Where the session's store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

/// Resolve the store location: `--db`, then the config file, then the default
/// file next to the executable.
pub fn resolve_store(explicit_path: Option<PathBuf>, config: Option<&ConfigFile>) -> StoreLocation {
    if let Some(path) = explicit_path {
        return StoreLocation::File(path);
    }

    match config.map(|c| &c.database) {
        Some(DatabaseConfigFile::Sqlite { path }) => StoreLocation::File(path.clone()),
        Some(DatabaseConfigFile::Mem) => StoreLocation::Memory,
        None => StoreLocation::File(default_db_path()),
    }
}

/// `sqlite.db` in the directory holding the running executable, falling back
/// to the current directory if that cannot be determined.
pub fn default_db_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_DB_FILE)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}
