use std::io::Write;
use std::path::Path;

use db::queries::import::{CsvImport, ImportResult};

use super::{ImportCmd, FILE_PROMPT, TABLE_PROMPT};
use crate::commands::{CommandContext, Execute};
use crate::error::CommandError;

impl Execute for ImportCmd {
    type Output = ImportResult;

    fn execute(self, ctx: &mut CommandContext<'_>) -> Result<Self::Output, CommandError> {
        let file = ctx.prompt(FILE_PROMPT)?;
        let import = CsvImport::open(Path::new(&file))?;

        let table = ctx.prompt(TABLE_PROMPT)?;
        tracing::info!(file = %file, table = %table, "importing CSV");

        let db = ctx.db;
        let out = &mut *ctx.out;
        let mut write_error = None;
        let result = import.import_into(db, &table, &mut |progress| {
            if write_error.is_none() {
                write_error = writeln!(out, "Imported {} rows...", progress.rows_imported).err();
            }
        });

        // The load runs to completion before a broken terminal ends the session.
        if let Some(e) = write_error {
            return Err(CommandError::Terminal(e));
        }
        Ok(result?)
    }
}
