//! Value types shared by the store, the importer and the exporter.
//!
//! A [`Value`] is the single representation of a cell as it crosses the store
//! boundary: bound as a parameter on insert, read back from a result row,
//! rendered in the text preview and serialized into CSV. Every consumer matches
//! on it exhaustively.

use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};

/// A single cell value.
///
/// `Blob` never comes out of CSV coercion; it only appears when an operator's
/// own SQL produces binary data.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Render the value as a CSV field. NULL becomes the empty string.
    pub fn to_csv_field(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::Integer(i) => Cow::Owned(i.to_string()),
            Value::Float(f) => Cow::Owned(format_float(*f)),
            Value::Text(s) => Cow::Borrowed(s),
            Value::Blob(b) => Cow::Owned(hex::encode(b)),
        }
    }
}

/// Shortest round-trip rendering, keeping a trailing `.0` on integral values.
///
/// Exponents carry an explicit sign and at least two digits (`1e+16`,
/// `1.5e-07`); NaN is spelled `nan`.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    let shortest = format!("{:?}", f);
    match shortest.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => shortest,
    }
}

/// Preview rendering: NULL is spelled out, everything else matches CSV.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            other => f.write_str(&other.to_csv_field()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Blob(b) => serializer.serialize_str(&hex::encode(b)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Null, "")]
    #[case(Value::Integer(-7), "-7")]
    #[case(Value::Float(50.0), "50.0")]
    #[case(Value::Float(3.14), "3.14")]
    #[case(Value::Text("Ann".to_string()), "Ann")]
    #[case(Value::Blob(vec![0xde, 0xad]), "dead")]
    fn test_csv_field(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_csv_field(), expected);
    }

    #[rstest]
    #[case(1e16, "1e+16")]
    #[case(9223372036854775808.0, "9.223372036854776e+18")]
    #[case(1.5e300, "1.5e+300")]
    #[case(1e-5, "1e-05")]
    #[case(1.5e-7, "1.5e-07")]
    #[case(1e15, "1000000000000000.0")]
    #[case(0.0001, "0.0001")]
    #[case(-2.5, "-2.5")]
    #[case(f64::INFINITY, "inf")]
    #[case(f64::NEG_INFINITY, "-inf")]
    #[case(f64::NAN, "nan")]
    fn test_format_float(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_float(value), expected);
    }

    #[rstest]
    fn test_display_spells_out_null() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Integer(42).to_string(), "42");
    }

    #[rstest]
    fn test_serialize_as_json_scalars() {
        let values = vec![
            Value::Null,
            Value::Integer(1),
            Value::Float(2.5),
            Value::Text("x".to_string()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,1,2.5,"x"]"#);
    }
}
