//! Store layer for csvsql - CSV import, CSV export and statement execution over SQLite

pub mod backend;
pub mod db;
pub mod queries;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export commonly used items
pub use backend::{Database, StatementOutcome};
pub use db::{open_db, open_mem_db, DbError};
pub use types::Value;
