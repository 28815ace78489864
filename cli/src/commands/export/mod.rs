mod execute;
mod execute_tests;
mod output;

/// Re-run the most recent row-producing query and write its full result to a
/// CSV file.
#[derive(Debug)]
pub struct ExportCmd {
    /// Text of the query to re-run
    pub query: String,
}

/// Prompt for the destination file.
pub const FILE_PROMPT: &str = "Enter a CSV file to store the results of the most recent SQL query in: ";

/// Shown instead of prompting when no query has produced rows yet.
pub const NOTHING_TO_EXPORT: &str = "You must enter a SQL query before exporting.";
