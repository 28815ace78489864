//! Streaming CSV export of a query's result.
//!
//! The query is executed first; the destination is only opened once the
//! store has produced the result's columns, so a query that fails up front
//! leaves no file behind. After that each row is written as soon as it is
//! pulled from the cursor. A failure part-way through leaves a partial file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::backend::{Database, Flow, RowSink, StatementOutcome};
use crate::db::DbError;
use crate::types::Value;

/// Rows written between progress reports.
pub const EXPORT_PROGRESS_INTERVAL: u64 = 10_000;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create CSV file '{path}': {source}")]
    CreateFailed {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("The statement did not return any columns to export")]
    NoResultColumns,

    #[error(transparent)]
    Db(#[from] DbError),
}

/// Progress report emitted every [`EXPORT_PROGRESS_INTERVAL`] rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportProgress {
    /// Rows written so far.
    pub rows_exported: u64,
}

/// Result of a completed export
#[derive(Debug, Default, Serialize)]
pub struct ExportResult {
    pub query: String,
    pub columns: Vec<String>,
    pub rows_exported: u64,
}

/// Re-run `query` and write its full result to the file at `path`.
pub fn export_query_to_path(
    db: &dyn Database,
    query: &str,
    path: &Path,
    progress: &mut dyn FnMut(ExportProgress),
) -> Result<ExportResult, ExportError> {
    export_query(
        db,
        query,
        || {
            File::create(path).map_err(|source| ExportError::CreateFailed {
                path: path.display().to_string(),
                source,
            })
        },
        progress,
    )
}

/// Re-run `query` and stream its rows as CSV into the writer returned by
/// `open`, which is called once the result's columns are known.
pub fn export_query<W, F>(
    db: &dyn Database,
    query: &str,
    open: F,
    progress: &mut dyn FnMut(ExportProgress),
) -> Result<ExportResult, ExportError>
where
    W: Write,
    F: FnOnce() -> Result<W, ExportError>,
{
    let mut sink = CsvSink {
        open: Some(open),
        writer: None,
        columns: Vec::new(),
        rows: 0,
        progress,
        error: None,
    };

    let outcome = db.run_statement(query, &mut sink)?;
    if let Some(err) = sink.error.take() {
        return Err(err);
    }
    if outcome != StatementOutcome::Rows {
        return Err(ExportError::NoResultColumns);
    }
    if let Some(writer) = sink.writer.as_mut() {
        writer.flush().map_err(csv::Error::from)?;
    }

    tracing::info!(rows = sink.rows, "export finished");
    Ok(ExportResult {
        query: query.to_string(),
        columns: sink.columns,
        rows_exported: sink.rows,
    })
}

/// Row sink that writes every row straight into a CSV writer.
///
/// Write errors cannot cross the [`RowSink`] boundary, so the first one is
/// kept and the cursor is stopped.
struct CsvSink<'p, W: Write, F> {
    open: Option<F>,
    writer: Option<csv::Writer<W>>,
    columns: Vec<String>,
    rows: u64,
    progress: &'p mut dyn FnMut(ExportProgress),
    error: Option<ExportError>,
}

impl<W, F> CsvSink<'_, W, F>
where
    W: Write,
    F: FnOnce() -> Result<W, ExportError>,
{
    fn start(&mut self, names: &[String]) -> Result<(), ExportError> {
        let open = self.open.take().ok_or(ExportError::NoResultColumns)?;
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(open()?);
        writer.write_record(names)?;
        self.writer = Some(writer);
        self.columns = names.to_vec();
        Ok(())
    }

    fn write(&mut self, values: &[Value]) -> Result<(), ExportError> {
        if self.rows > 0 && self.rows % EXPORT_PROGRESS_INTERVAL == 0 {
            tracing::debug!(rows = self.rows, "export progress");
            (self.progress)(ExportProgress {
                rows_exported: self.rows,
            });
        }
        if let Some(writer) = self.writer.as_mut() {
            writer.write_record(values.iter().map(|v| v.to_csv_field().into_owned()))?;
        }
        self.rows += 1;
        Ok(())
    }

    fn stop_with(&mut self, err: ExportError) -> Flow {
        self.error = Some(err);
        Flow::Stop
    }
}

impl<W, F> RowSink for CsvSink<'_, W, F>
where
    W: Write,
    F: FnOnce() -> Result<W, ExportError>,
{
    fn columns(&mut self, names: &[String]) -> Flow {
        match self.start(names) {
            Ok(()) => Flow::Continue,
            Err(e) => self.stop_with(e),
        }
    }

    fn row(&mut self, values: Vec<Value>) -> Flow {
        match self.write(&values) {
            Ok(()) => Flow::Continue,
            Err(e) => self.stop_with(e),
        }
    }
}
