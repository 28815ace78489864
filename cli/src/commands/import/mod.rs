mod execute;
mod output;

/// Load a CSV file into a new table.
///
/// Prompts for the source file first; its header is read and validated before
/// the operator is asked for the table name.
#[derive(Debug, Default)]
pub struct ImportCmd;

/// Prompt for the CSV source file.
pub const FILE_PROMPT: &str = "Enter a CSV file to import: ";

/// Prompt for the name of the table to create.
pub const TABLE_PROMPT: &str = "Enter a SQL table name: ";
