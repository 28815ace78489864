//! Execution tests for export command.

#[cfg(test)]
mod tests {
    use super::super::{ExportCmd, FILE_PROMPT};
    use crate::commands::{CommandContext, Execute};
    use crate::error::{CommandError, ErrorKind};
    use crate::session::{BrokenTerminal, ScriptedInput};
    use db::queries::export::ExportResult;
    use db::test_utils::{setup_empty_test_db, setup_test_db};
    use db::{fixtures, Database};
    use rstest::rstest;

    fn run_export(
        db: &dyn Database,
        query: &str,
        input: &mut ScriptedInput,
    ) -> (Result<ExportResult, CommandError>, String) {
        let mut out = Vec::new();
        let result = {
            let mut ctx = CommandContext { db, input, out: &mut out };
            ExportCmd {
                query: query.to_string(),
            }
            .execute(&mut ctx)
        };
        (result, String::from_utf8(out).unwrap())
    }

    #[rstest]
    fn test_export_writes_full_result() {
        let db = setup_test_db(fixtures::CITIES_CSV, "cities");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cities.csv");
        let mut input = ScriptedInput::new([path.to_str().unwrap()]);

        let (result, out) = run_export(&*db, "SELECT city FROM cities", &mut input);
        let result = result.expect("Export should succeed");

        assert_eq!(input.prompts, vec![FILE_PROMPT]);
        assert_eq!(result.rows_exported, 25);
        assert!(out.is_empty());

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 26);
        assert!(written.starts_with("city\r\nTokyo\r\n"));
    }

    #[rstest]
    fn test_progress_is_written() {
        let db = setup_empty_test_db();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("numbers.csv");
        let mut input = ScriptedInput::new([path.to_str().unwrap()]);
        let query = "WITH RECURSIVE n(i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM n WHERE i < 10001) SELECT i FROM n";

        let (result, out) = run_export(&*db, query, &mut input);
        assert_eq!(result.unwrap().rows_exported, 10_001);
        assert_eq!(out, "Exported 10000 rows...\n");
    }

    #[rstest]
    fn test_progress_write_failure_is_terminal_error() {
        let db = setup_empty_test_db();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("numbers.csv");
        let mut input = ScriptedInput::new([path.to_str().unwrap()]);
        let query = "WITH RECURSIVE n(i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM n WHERE i < 10001) SELECT i FROM n";

        let result = {
            let mut ctx = CommandContext {
                db: &*db,
                input: &mut input,
                out: &mut BrokenTerminal,
            };
            ExportCmd {
                query: query.to_string(),
            }
            .execute(&mut ctx)
        };

        assert!(matches!(result, Err(CommandError::Terminal(_))));
        assert!(path.exists());
    }

    #[rstest]
    fn test_query_failing_on_rerun_is_store_error() {
        let db = setup_test_db(fixtures::CITIES_CSV, "cities");
        db.execute("DROP TABLE cities").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cities.csv");
        let mut input = ScriptedInput::new([path.to_str().unwrap()]);

        let (result, _) = run_export(&*db, "SELECT * FROM cities", &mut input);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Store);
        assert!(!path.exists());
    }

    #[rstest]
    fn test_unwritable_destination_is_resource_error() {
        let db = setup_test_db(fixtures::CITIES_CSV, "cities");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("cities.csv");
        let mut input = ScriptedInput::new([path.to_str().unwrap()]);

        let (result, _) = run_export(&*db, "SELECT * FROM cities", &mut input);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Resource);
    }
}
