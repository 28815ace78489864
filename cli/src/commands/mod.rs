//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct and its [`Execute`] implementation (`execute.rs`)
//! - Operator-facing formatting of its result (`output.rs`)

pub mod export;
pub mod import;
pub mod query;

pub use export::ExportCmd;
pub use import::ImportCmd;
pub use query::QueryCmd;

use std::io::Write;

use db::Database;

use crate::error::CommandError;
use crate::output::{OutputFormat, Outputable};
use crate::session::LineSource;

/// Everything a command may touch while it runs.
pub struct CommandContext<'a> {
    pub db: &'a dyn Database,
    pub input: &'a mut dyn LineSource,
    pub out: &'a mut dyn Write,
}

impl CommandContext<'_> {
    /// Ask the operator for one line. Fails with [`CommandError::InputClosed`]
    /// if input has ended.
    pub fn prompt(&mut self, prompt: &str) -> Result<String, CommandError> {
        self.input.read_line(prompt)?.ok_or(CommandError::InputClosed)
    }
}

/// Trait for executing commands with command-specific result types.
pub trait Execute: Sized {
    type Output: Outputable;

    fn execute(self, ctx: &mut CommandContext<'_>) -> Result<Self::Output, CommandError>;

    /// Execute the command and write its formatted result.
    fn run(self, ctx: &mut CommandContext<'_>, format: OutputFormat) -> Result<Self::Output, CommandError> {
        let output = self.execute(ctx)?;
        writeln!(ctx.out, "{}", output.format(format))?;
        Ok(output)
    }
}
