//! Output formatting for import command results.

use db::queries::import::ImportResult;

use crate::output::Outputable;

impl Outputable for ImportResult {
    fn to_table(&self) -> String {
        format!(
            "Imported {} row(s).\nImported table \"{}\" with columns: {}.",
            self.rows_imported,
            self.table,
            self.columns.join(", ")
        )
    }
}
