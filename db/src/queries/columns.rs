//! Column name derivation for CSV imports.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static NON_IDENTIFIER_CHAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9_]").unwrap());
static UNDERSCORE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__+").unwrap());

/// Return SQL column names for a CSV header row.
///
/// Each header is lowercased, every character outside `[a-z0-9_]` becomes
/// `_`, and runs of underscores shrink to one. A name that collides with an
/// earlier column gets the smallest free numeric suffix starting at 2
/// (`total`, `total2`, `total3`, ...).
///
/// The output is parallel to `row`. Callers must reject empty header cells
/// before calling this.
pub fn to_column_names<S: AsRef<str>>(row: &[S]) -> Vec<String> {
    let mut column_names = Vec::with_capacity(row.len());
    let mut column_name_set = HashSet::with_capacity(row.len());

    for header in row {
        let base = normalize(header.as_ref());
        let name = if column_name_set.contains(&base) {
            let mut suffix = 2u64;
            while column_name_set.contains(&format!("{base}{suffix}")) {
                suffix += 1;
            }
            format!("{base}{suffix}")
        } else {
            base
        };
        column_name_set.insert(name.clone());
        column_names.push(name);
    }

    column_names
}

fn normalize(header: &str) -> String {
    let lowered = header.to_lowercase();
    let replaced = NON_IDENTIFIER_CHAR.replace_all(&lowered, "_");
    UNDERSCORE_RUN.replace_all(&replaced, "_").into_owned()
}
