use std::io::Write;
use std::path::Path;

use db::queries::export::{export_query_to_path, ExportResult};

use super::{ExportCmd, FILE_PROMPT};
use crate::commands::{CommandContext, Execute};
use crate::error::CommandError;

impl Execute for ExportCmd {
    type Output = ExportResult;

    fn execute(self, ctx: &mut CommandContext<'_>) -> Result<Self::Output, CommandError> {
        let file = ctx.prompt(FILE_PROMPT)?;
        tracing::info!(file = %file, query = %self.query, "exporting query result");

        let db = ctx.db;
        let out = &mut *ctx.out;
        let mut write_error = None;
        let result = export_query_to_path(db, &self.query, Path::new(&file), &mut |progress| {
            if write_error.is_none() {
                write_error = writeln!(out, "Exported {} rows...", progress.rows_exported).err();
            }
        });

        if let Some(e) = write_error {
            return Err(CommandError::Terminal(e));
        }
        Ok(result?)
    }
}
