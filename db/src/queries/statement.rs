//! Run one operator statement and classify what it did.
//!
//! Row-producing statements are not drained: the preview keeps the first
//! [`PREVIEW_ROW_LIMIT`] rows and pulls exactly one more to learn whether the
//! result was truncated, then releases the cursor.

use serde::Serialize;

use crate::backend::{Database, Flow, RowSink, StatementOutcome};
use crate::db::DbError;
use crate::types::Value;

/// Maximum number of rows kept for a result preview.
pub const PREVIEW_ROW_LIMIT: usize = 20;

/// The first rows of a row-producing statement's result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultPreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    /// True if the result had more than [`PREVIEW_ROW_LIMIT`] rows.
    pub truncated: bool,
}

/// What running a statement produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// The statement returned a result set.
    Rows(ResultPreview),
    /// A data-modifying statement changed this many rows.
    Modified { rows: u64 },
    /// The statement ran; the store reports no row count for it.
    Done,
}

impl QueryOutcome {
    /// True if the statement produced a result set and may be exported.
    pub fn is_row_producing(&self) -> bool {
        matches!(self, QueryOutcome::Rows(_))
    }
}

struct PreviewSink {
    preview: ResultPreview,
    limit: usize,
}

impl RowSink for PreviewSink {
    fn columns(&mut self, names: &[String]) -> Flow {
        self.preview.columns = names.to_vec();
        Flow::Continue
    }

    fn row(&mut self, values: Vec<Value>) -> Flow {
        if self.preview.rows.len() < self.limit {
            self.preview.rows.push(values);
            Flow::Continue
        } else {
            self.preview.truncated = true;
            Flow::Stop
        }
    }
}

/// Execute one statement, commit whatever it left open and classify it.
pub fn run_statement(db: &dyn Database, sql: &str) -> Result<QueryOutcome, DbError> {
    run_statement_with_limit(db, sql, PREVIEW_ROW_LIMIT)
}

/// [`run_statement`] with an explicit preview size.
pub fn run_statement_with_limit(
    db: &dyn Database,
    sql: &str,
    limit: usize,
) -> Result<QueryOutcome, DbError> {
    let mut sink = PreviewSink {
        preview: ResultPreview::default(),
        limit,
    };

    let outcome = db.run_statement(sql, &mut sink)?;
    // The cursor is finalized once the preview pull returns; SQLite refuses
    // COMMIT while a writing statement is still stepping.
    db.commit()?;

    Ok(match outcome {
        StatementOutcome::Rows => QueryOutcome::Rows(sink.preview),
        StatementOutcome::Modified(rows) => QueryOutcome::Modified { rows },
        StatementOutcome::Done => QueryOutcome::Done,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::test_utils::{query_rows, setup_empty_test_db, setup_test_db};
    use rstest::{fixture, rstest};

    #[fixture]
    fn cities() -> Box<dyn Database> {
        setup_test_db(fixtures::CITIES_CSV, "cities")
    }

    fn preview(outcome: QueryOutcome) -> ResultPreview {
        match outcome {
            QueryOutcome::Rows(preview) => preview,
            other => panic!("Expected rows, got {:?}", other),
        }
    }

    #[rstest]
    fn test_25_rows_are_truncated_to_20(cities: Box<dyn Database>) {
        let preview = preview(run_statement(&*cities, "SELECT * FROM cities").unwrap());
        assert_eq!(preview.columns, vec!["city", "country", "population"]);
        assert_eq!(preview.rows.len(), 20);
        assert!(preview.truncated);
    }

    #[rstest]
    fn test_exactly_20_rows_are_not_truncated(cities: Box<dyn Database>) {
        let preview = preview(run_statement(&*cities, "SELECT city FROM cities LIMIT 20").unwrap());
        assert_eq!(preview.rows.len(), 20);
        assert!(!preview.truncated);
    }

    #[rstest]
    fn test_zero_rows(cities: Box<dyn Database>) {
        let preview = preview(run_statement(&*cities, "SELECT city FROM cities WHERE 0").unwrap());
        assert_eq!(preview.columns, vec!["city"]);
        assert!(preview.rows.is_empty());
        assert!(!preview.truncated);
    }

    #[rstest]
    fn test_null_cells_are_kept_as_null(cities: Box<dyn Database>) {
        let preview = preview(
            run_statement(&*cities, "SELECT population FROM cities WHERE city = 'Shenzhen'").unwrap(),
        );
        assert_eq!(preview.rows, vec![vec![Value::Null]]);
    }

    #[rstest]
    fn test_update_reports_modified_rows(cities: Box<dyn Database>) {
        let outcome = run_statement(&*cities, "UPDATE cities SET population = 0 WHERE country = 'China'").unwrap();
        assert_eq!(outcome, QueryOutcome::Modified { rows: 6 });
        assert!(!outcome.is_row_producing());
    }

    #[rstest]
    fn test_ddl_reports_done() {
        let db = setup_empty_test_db();
        assert_eq!(run_statement(&*db, "CREATE TABLE t (a)").unwrap(), QueryOutcome::Done);
    }

    #[rstest]
    fn test_open_transaction_is_committed(cities: Box<dyn Database>) {
        run_statement(&*cities, "BEGIN").unwrap();
        run_statement(&*cities, "DELETE FROM cities").unwrap();
        // A second BEGIN only succeeds if the first transaction was closed.
        run_statement(&*cities, "BEGIN").unwrap();
        run_statement(&*cities, "SELECT 1").unwrap();
        assert_eq!(query_rows(&*cities, "SELECT COUNT(*) FROM cities"), vec![vec![Value::Integer(0)]]);
    }

    #[rstest]
    fn test_truncated_returning_statement_is_committed(cities: Box<dyn Database>) {
        run_statement(&*cities, "BEGIN").unwrap();
        let outcome = run_statement_with_limit(&*cities, "DELETE FROM cities RETURNING city", 1).unwrap();
        assert!(preview(outcome).truncated);
        run_statement(&*cities, "BEGIN").unwrap();
        run_statement(&*cities, "SELECT 1").unwrap();
        assert_eq!(query_rows(&*cities, "SELECT COUNT(*) FROM cities"), vec![vec![Value::Integer(0)]]);
    }

    #[rstest]
    fn test_engine_error_is_returned(cities: Box<dyn Database>) {
        let err = run_statement(&*cities, "SELEC 1").unwrap_err();
        assert!(err.to_string().contains("syntax error"));
    }

    #[rstest]
    fn test_custom_limit() {
        let db = setup_empty_test_db();
        let outcome = run_statement_with_limit(&*db, "SELECT 1 UNION ALL SELECT 2", 1).unwrap();
        let preview = preview(outcome);
        assert_eq!(preview.rows, vec![vec![Value::Integer(1)]]);
        assert!(preview.truncated);
    }
}
