//! The interactive command session.
//!
//! A [`Session`] owns the store handle and the text of the last row-producing
//! query for one run of the prompt loop. Each non-empty line is routed to the
//! import command, the export command or run as SQL. A failed command prints
//! one `Error: ...` line and the loop carries on.

use std::io::{self, Write};

use db::Database;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commands::export::NOTHING_TO_EXPORT;
use crate::commands::{CommandContext, Execute, ExportCmd, ImportCmd, QueryCmd};
use crate::error::{CommandError, ErrorKind};
use crate::output::OutputFormat;

/// Printed once when the session starts.
pub const GREETING: &str = "Enter \"import\", \"export\", or a SQL query.";

/// Prompt for each command line.
pub const PROMPT: &str = "> ";

/// Source of operator input lines.
pub trait LineSource {
    /// Show `prompt` and read one line without its terminator.
    ///
    /// Returns `Ok(None)` once input has ended.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Record a command line in the input history.
    fn add_history(&mut self, _line: &str) {}
}

/// Line editor on the terminal with in-memory history.
pub struct RustylineSource {
    editor: DefaultEditor,
}

impl RustylineSource {
    pub fn new() -> Result<Self, ReadlineError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for RustylineSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            // Ctrl-D and Ctrl-C both end the session.
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::other(e)),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }
}

pub struct Session {
    db: Box<dyn Database>,
    last_query: Option<String>,
    format: OutputFormat,
}

impl Session {
    pub fn new(db: Box<dyn Database>, format: OutputFormat) -> Self {
        Self {
            db,
            last_query: None,
            format,
        }
    }

    /// Text of the most recent statement that produced rows, if any.
    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    /// Run the prompt loop until input ends.
    ///
    /// Only terminal I/O failures are returned; command failures are reported
    /// to `out` and the loop continues.
    pub fn run(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", GREETING)?;

        while let Some(line) = input.read_line(PROMPT)? {
            let command = line.trim();
            if command.is_empty() {
                continue;
            }
            input.add_history(command);

            match self.dispatch(command, input, out) {
                Ok(()) => {}
                Err(CommandError::InputClosed) => break,
                Err(CommandError::Terminal(e)) => return Err(e),
                Err(err) => report_error(&err, out)?,
            }
        }

        tracing::info!(last_query = ?self.last_query(), "session ended");
        Ok(())
    }

    fn dispatch(
        &mut self,
        command: &str,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let mut ctx = CommandContext {
            db: &*self.db,
            input,
            out,
        };

        match command {
            "import" => {
                tracing::debug!("dispatching import");
                ImportCmd.run(&mut ctx, self.format)?;
            }
            "export" => match self.last_query.clone() {
                Some(query) => {
                    tracing::debug!("dispatching export");
                    ExportCmd { query }.run(&mut ctx, self.format)?;
                }
                None => writeln!(ctx.out, "{}", NOTHING_TO_EXPORT)?,
            },
            sql => {
                tracing::debug!(sql_preview = %preview(sql), "dispatching statement");
                let outcome = QueryCmd { sql: sql.to_string() }.run(&mut ctx, self.format)?;
                if outcome.is_row_producing() {
                    self.last_query = Some(sql.to_string());
                }
            }
        }
        Ok(())
    }
}

fn report_error(err: &CommandError, out: &mut dyn Write) -> io::Result<()> {
    match err.kind() {
        ErrorKind::Input => tracing::debug!(error = %err, "command rejected"),
        ErrorKind::Store => tracing::info!(error = %err, "statement failed"),
        ErrorKind::Resource => tracing::info!(error = %err, "file operation failed"),
    }
    writeln!(out, "Error: {}", err)
}

fn preview(sql: &str) -> String {
    sql.chars().take(100).collect()
}

/// Input lines fed from a script, recording every prompt shown.
#[cfg(test)]
pub struct ScriptedInput {
    lines: std::collections::VecDeque<String>,
    pub prompts: Vec<String>,
}

#[cfg(test)]
impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }
}

#[cfg(test)]
impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}

/// Terminal whose every write fails, as after the reader hangs up.
#[cfg(test)]
pub struct BrokenTerminal;

#[cfg(test)]
impl Write for BrokenTerminal {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
