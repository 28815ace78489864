//! Output formatting for export command results.

use db::queries::export::ExportResult;

use crate::output::Outputable;

impl Outputable for ExportResult {
    fn to_table(&self) -> String {
        format!("Exported {} row(s).", self.rows_exported)
    }
}
