mod execute;
mod output;

/// Run one SQL statement and preview or summarize its result.
#[derive(Debug)]
pub struct QueryCmd {
    pub sql: String,
}
