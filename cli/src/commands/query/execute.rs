use db::queries::statement::{run_statement, QueryOutcome};

use super::QueryCmd;
use crate::commands::{CommandContext, Execute};
use crate::error::CommandError;

impl Execute for QueryCmd {
    type Output = QueryOutcome;

    fn execute(self, ctx: &mut CommandContext<'_>) -> Result<Self::Output, CommandError> {
        let outcome = run_statement(ctx.db, &self.sql)?;
        tracing::debug!(row_producing = outcome.is_row_producing(), "statement finished");
        Ok(outcome)
    }
}
