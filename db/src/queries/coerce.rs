//! Type inference for CSV cells.

use crate::types::Value;

/// Leading characters stripped before numeric parsing.
const CURRENCY_SYMBOLS: [char; 4] = ['$', '\u{20ac}', '\u{a5}', '\u{a3}'];

/// Return the store value for the specified CSV cell string.
///
/// - `""` is NULL.
/// - One leading currency symbol (`$`, `€`, `¥`, `£`) is ignored for numeric
///   parsing; surrounding whitespace is ignored too.
/// - Integers inside the signed 64-bit range are stored as integers, larger
///   ones fall back to the nearest float.
/// - Anything else that parses as a float is a float.
/// - Everything else is text, stored exactly as it appeared in the file,
///   currency symbol included.
pub fn to_db_value(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }

    let numeric = cell.strip_prefix(CURRENCY_SYMBOLS).unwrap_or(cell).trim();

    if let Ok(i) = numeric.parse::<i64>() {
        return Value::Integer(i);
    }
    // Out-of-range integers fail above and land here as floats.
    if let Ok(f) = numeric.parse::<f64>() {
        return Value::Float(f);
    }

    Value::Text(cell.to_string())
}
