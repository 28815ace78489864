//! CSV import into a newly created table.
//!
//! An import runs in two steps so the header can be validated before the
//! operator is asked for a table name:
//!
//! 1. [`CsvImport::open`] / [`CsvImport::from_reader`] read the header row,
//!    reject empty header cells and derive the column names.
//! 2. [`CsvImport::import_into`] creates the table and streams the data rows
//!    into it, [`IMPORT_BATCH_SIZE`] rows per transaction.
//!
//! Each batch commits on its own. When a later batch fails, the table and the
//! batches before it stay in the store; nothing is cleaned up.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::backend::Database;
use crate::db::{column_list, quote_identifier, DbError};
use crate::queries::coerce::to_db_value;
use crate::queries::columns::to_column_names;
use crate::types::Value;

/// Rows read, inserted and committed per transaction.
pub const IMPORT_BATCH_SIZE: usize = 10_000;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to open CSV file '{path}': {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("The CSV file has no header row")]
    MissingHeader,

    #[error("There is no header in row 1, column {column}")]
    EmptyHeaderField { column: usize },

    #[error(
        "The table name may not contain a quotation mark. Your entry will automatically be \
         enclosed in quotation marks, so it should be an ordinary string rather than a quoted \
         identifier."
    )]
    InvalidTableName,

    #[error(transparent)]
    Db(#[from] DbError),
}

impl ImportError {
    /// True for failures caused by the input itself rather than the store or
    /// the filesystem.
    pub fn is_input_error(&self) -> bool {
        match self {
            ImportError::MissingHeader
            | ImportError::EmptyHeaderField { .. }
            | ImportError::InvalidTableName => true,
            ImportError::Csv(e) => !matches!(e.kind(), csv::ErrorKind::Io(_)),
            ImportError::OpenFailed { .. } | ImportError::Db(_) => false,
        }
    }
}

/// Progress report emitted before each batch after the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportProgress {
    /// Rows committed so far.
    pub rows_imported: u64,
}

/// Result of a completed import
#[derive(Debug, Default, Serialize)]
pub struct ImportResult {
    pub table: String,
    pub columns: Vec<String>,
    pub rows_imported: u64,
    pub batches: usize,
}

/// A CSV source whose header has been read and validated.
pub struct CsvImport<R: Read> {
    reader: csv::Reader<R>,
    column_names: Vec<String>,
}

impl CsvImport<File> {
    /// Open a UTF-8, comma-delimited CSV file and read its header row.
    pub fn open(path: &Path) -> Result<Self, ImportError> {
        let file = File::open(path).map_err(|source| ImportError::OpenFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }
}

impl<R: Read> CsvImport<R> {
    /// Read the header row from `rdr` and derive the column names.
    pub fn from_reader(rdr: R) -> Result<Self, ImportError> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(rdr);

        let header = reader.headers()?;
        if header.is_empty() {
            return Err(ImportError::MissingHeader);
        }
        if let Some(index) = header.iter().position(str::is_empty) {
            return Err(ImportError::EmptyHeaderField { column: index + 1 });
        }

        let column_names = to_column_names(&header.iter().collect::<Vec<_>>());
        tracing::debug!(columns = ?column_names, "CSV header read");

        Ok(Self {
            reader,
            column_names,
        })
    }

    /// Column names the table will be created with.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Create `table_name` and load every remaining CSV row into it.
    ///
    /// `progress` is called before each batch after the first with the number
    /// of rows committed so far.
    pub fn import_into(
        mut self,
        db: &dyn Database,
        table_name: &str,
        progress: &mut dyn FnMut(ImportProgress),
    ) -> Result<ImportResult, ImportError> {
        if table_name.contains('"') {
            return Err(ImportError::InvalidTableName);
        }

        let table_sql = quote_identifier(table_name);
        let columns_sql = column_list(&self.column_names);
        db.execute(&format!("CREATE TABLE {table_sql} {columns_sql};"))?;
        tracing::info!(table = %table_name, columns = self.column_names.len(), "table created");

        let placeholders = vec!["?"; self.column_names.len()].join(", ");
        let insert_sql = format!("INSERT INTO {table_sql} {columns_sql} VALUES ({placeholders});");

        let mut result = ImportResult {
            table: table_name.to_string(),
            columns: self.column_names.clone(),
            ..Default::default()
        };

        loop {
            let batch = self.read_batch()?;
            if batch.is_empty() {
                break;
            }
            if result.rows_imported > 0 {
                progress(ImportProgress {
                    rows_imported: result.rows_imported,
                });
            }

            let inserted = db.execute_many(&insert_sql, &batch)?;
            result.rows_imported += inserted as u64;
            result.batches += 1;
            tracing::debug!(batch = result.batches, rows_imported = result.rows_imported, "batch committed");

            if batch.len() < IMPORT_BATCH_SIZE {
                break;
            }
        }

        tracing::info!(table = %table_name, rows = result.rows_imported, "import finished");
        Ok(result)
    }

    /// Read and coerce up to [`IMPORT_BATCH_SIZE`] data rows.
    fn read_batch(&mut self) -> Result<Vec<Vec<Value>>, ImportError> {
        let mut batch = Vec::new();
        let mut record = csv::StringRecord::new();
        while batch.len() < IMPORT_BATCH_SIZE && self.reader.read_record(&mut record)? {
            batch.push(record.iter().map(to_db_value).collect());
        }
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_mem_db;
    use crate::fixtures;
    use crate::test_utils::query_rows as select_all;
    use rstest::{fixture, rstest};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn import_str(
        db: &dyn Database,
        csv: &str,
        table: &str,
    ) -> (Result<ImportResult, ImportError>, Vec<ImportProgress>) {
        let mut reports = Vec::new();
        let result = CsvImport::from_reader(csv.as_bytes())
            .and_then(|import| import.import_into(db, table, &mut |p| reports.push(p)));
        (result, reports)
    }

    fn numbered_rows(count: usize) -> String {
        let mut csv = String::from("n,label\n");
        for i in 0..count {
            csv.push_str(&format!("{i},row {i}\n"));
        }
        csv
    }

    #[fixture]
    fn db() -> Box<dyn Database> {
        open_mem_db().expect("Failed to open in-memory store")
    }

    #[rstest]
    fn test_import_creates_and_fills_table(db: Box<dyn Database>) {
        let (result, reports) = import_str(&*db, fixtures::PAYMENTS_CSV, "payments");
        let result = result.expect("Import should succeed");

        assert_eq!(result.table, "payments");
        assert_eq!(result.columns, vec!["name", "amount"]);
        assert_eq!(result.rows_imported, 2);
        assert_eq!(result.batches, 1);
        assert!(reports.is_empty());

        let rows = select_all(&*db, "SELECT name, amount FROM payments ORDER BY rowid");
        assert_eq!(
            rows,
            vec![
                vec![Value::Text("Ann".to_string()), Value::Integer(50)],
                vec![Value::Text("Bo".to_string()), Value::Null],
            ]
        );
    }

    #[rstest]
    fn test_cells_keep_their_inferred_types(db: Box<dyn Database>) {
        let (result, _) = import_str(&*db, fixtures::MIXED_TYPES_CSV, "mixed");
        result.expect("Import should succeed");

        let rows = select_all(&*db, "SELECT typeof(value) FROM mixed ORDER BY rowid");
        let types: Vec<Value> = rows.into_iter().flatten().collect();
        assert_eq!(
            types,
            vec![
                Value::from("integer"),
                Value::from("real"),
                Value::from("real"),
                Value::from("text"),
                Value::from("null"),
                Value::from("text"),
            ]
        );
    }

    #[rstest]
    fn test_header_only_file_creates_empty_table(db: Box<dyn Database>) {
        let (result, reports) = import_str(&*db, "A,B\n", "empty");
        let result = result.expect("Import should succeed");
        assert_eq!(result.rows_imported, 0);
        assert_eq!(result.batches, 0);
        assert!(reports.is_empty());
        assert_eq!(select_all(&*db, "SELECT COUNT(*) FROM empty"), vec![vec![Value::Integer(0)]]);
    }

    #[rstest]
    fn test_large_import_commits_in_batches(db: Box<dyn Database>) {
        let (result, reports) = import_str(&*db, &numbered_rows(IMPORT_BATCH_SIZE + 3), "big");
        let result = result.expect("Import should succeed");

        assert_eq!(result.rows_imported, 10_003);
        assert_eq!(result.batches, 2);
        assert_eq!(reports, vec![ImportProgress { rows_imported: 10_000 }]);
        assert_eq!(select_all(&*db, "SELECT COUNT(*) FROM big"), vec![vec![Value::Integer(10_003)]]);
    }

    #[rstest]
    fn test_exactly_one_full_batch_reports_no_progress(db: Box<dyn Database>) {
        let (result, reports) = import_str(&*db, &numbered_rows(IMPORT_BATCH_SIZE), "full");
        assert_eq!(result.expect("Import should succeed").rows_imported, 10_000);
        assert!(reports.is_empty());
    }

    #[rstest]
    fn test_empty_header_cell_is_rejected() {
        let err = CsvImport::from_reader("a,,c\n1,2,3\n".as_bytes()).err().expect("Header should be rejected");
        assert!(matches!(err, ImportError::EmptyHeaderField { column: 2 }));
        assert_eq!(err.to_string(), "There is no header in row 1, column 2");
        assert!(err.is_input_error());
    }

    #[rstest]
    fn test_empty_file_is_rejected() {
        let err = CsvImport::from_reader("".as_bytes()).err().expect("Empty file should be rejected");
        assert!(matches!(err, ImportError::MissingHeader));
    }

    #[rstest]
    fn test_quoted_table_name_is_rejected_before_create(db: Box<dyn Database>) {
        let (result, _) = import_str(&*db, fixtures::PAYMENTS_CSV, "bad\"name");
        let err = result.err().expect("Table name should be rejected");
        assert!(matches!(err, ImportError::InvalidTableName));
        assert!(err.to_string().contains("quotation mark"));

        let tables = select_all(&*db, "SELECT COUNT(*) FROM sqlite_master");
        assert_eq!(tables, vec![vec![Value::Integer(0)]]);
    }

    #[rstest]
    fn test_existing_table_is_a_store_error(db: Box<dyn Database>) {
        db.execute("CREATE TABLE payments (x)").unwrap();
        let (result, _) = import_str(&*db, fixtures::PAYMENTS_CSV, "payments");
        let err = result.err().expect("Create should fail");
        assert!(matches!(err, ImportError::Db(_)));
        assert!(!err.is_input_error());
        assert!(err.to_string().contains("already exists"));
    }

    #[rstest]
    fn test_ragged_row_fails_after_earlier_batches_commit(db: Box<dyn Database>) {
        let mut csv = numbered_rows(IMPORT_BATCH_SIZE);
        csv.push_str("1,2,3\n");
        let (result, _) = import_str(&*db, &csv, "ragged");

        assert!(matches!(result, Err(ImportError::Csv(_))));
        assert_eq!(
            select_all(&*db, "SELECT COUNT(*) FROM ragged"),
            vec![vec![Value::Integer(10_000)]]
        );
    }

    #[rstest]
    fn test_open_reads_file_from_disk(db: Box<dyn Database>) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(fixtures::PAYMENTS_CSV.as_bytes()).unwrap();

        let import = CsvImport::open(file.path()).expect("Open should succeed");
        assert_eq!(import.column_names(), ["name", "amount"]);
        let result = import.import_into(&*db, "from_disk", &mut |_| {}).unwrap();
        assert_eq!(result.rows_imported, 2);
    }

    #[rstest]
    fn test_open_missing_file() {
        let err = CsvImport::open(Path::new("/nonexistent/input.csv")).err().expect("Open should fail");
        assert!(matches!(err, ImportError::OpenFailed { .. }));
        assert!(!err.is_input_error());
    }

    #[rstest]
    fn test_quoted_fields_and_duplicate_headers(db: Box<dyn Database>) {
        let csv = "Total,total,\"Unit, Price\"\n1,2,\"$3.50\"\n";
        let (result, _) = import_str(&*db, csv, "quoted");
        let result = result.expect("Import should succeed");
        assert_eq!(result.columns, vec!["total", "total2", "unit_price"]);
        assert_eq!(
            select_all(&*db, "SELECT total, total2, unit_price FROM quoted"),
            vec![vec![Value::Integer(1), Value::Integer(2), Value::Float(3.5)]]
        );
    }
}
