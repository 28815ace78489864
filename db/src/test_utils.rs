//! Shared test utilities for store and integration tests.
//!
//! This module provides common helpers for setting up test stores with fixture data.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::backend::{Database, Flow, RowSink};
use crate::db::open_mem_db;
use crate::queries::import::CsvImport;
use crate::types::Value;

/// Create a temporary file containing the given content.
///
/// Used to create CSV files for importing test data.
pub fn create_temp_csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

/// Import CSV content into a new table of an existing store.
pub fn import_csv_str(db: &dyn Database, csv: &str, table: &str) {
    CsvImport::from_reader(csv.as_bytes())
        .and_then(|import| import.import_into(db, table, &mut |_| {}))
        .expect("Import should succeed");
}

/// Create an in-memory store and import CSV content as `table`.
///
/// This is the standard setup for execute tests: create an in-memory store,
/// import test data, return the store for command execution.
pub fn setup_test_db(csv: &str, table: &str) -> Box<dyn Database> {
    let db = open_mem_db().expect("Failed to create in-memory DB");
    import_csv_str(&*db, csv, table);
    db
}

/// Create an empty in-memory store.
pub fn setup_empty_test_db() -> Box<dyn Database> {
    open_mem_db().expect("Failed to create in-memory DB")
}

/// Run a query and return every row it produces.
pub fn query_rows(db: &dyn Database, sql: &str) -> Vec<Vec<Value>> {
    struct Collect(Vec<Vec<Value>>);

    impl RowSink for Collect {
        fn columns(&mut self, _names: &[String]) -> Flow {
            Flow::Continue
        }

        fn row(&mut self, values: Vec<Value>) -> Flow {
            self.0.push(values);
            Flow::Continue
        }
    }

    let mut sink = Collect(Vec::new());
    db.run_statement(sql, &mut sink).expect("Query should succeed");
    sink.0
}
