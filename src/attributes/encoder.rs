//! JSON encoding of resolved values.
//!
//! Every value becomes a bare JSON scalar: booleans, integers, floats (always
//! with a decimal point), strings, and `null` for [`Value::Unknown`]. A float
//! that JSON cannot hold fails the whole table it belongs to.

use serde::{ser::Error as _, Serialize, Serializer};
use serde_json::{Map, Number as JsonNumber, Value as JsonValue};
use thiserror::Error;

use crate::value::{Number, Value};

use super::AttributeTable;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("failed to encode attribute to JSON: {key:?}: {reason}")]
pub struct EncodeError {
    pub key: String,
    pub reason: String,
}

pub fn encode_value(key: &str, value: &Value) -> Result<JsonValue, EncodeError> {
    Ok(match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Number(Number::Integer(i)) => JsonValue::Number((*i).into()),
        Value::Number(Number::Float(f)) => JsonValue::Number(encode_float(key, *f)?),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Unknown => JsonValue::Null,
    })
}

/// The number keeps the text of [`Number`]'s `Display`, so `1e20` is written as
/// `1.0e20` rather than the integer-looking `1e20` serde_json would pick.
fn encode_float(key: &str, f: f64) -> Result<JsonNumber, EncodeError> {
    let fail = |reason: String| EncodeError {
        key: key.to_string(),
        reason,
    };
    if !f.is_finite() {
        return Err(fail(format!("{} is not a finite number", f)));
    }
    Number::Float(f)
        .to_string()
        .parse::<JsonNumber>()
        .map_err(|e| fail(e.to_string()))
}

/// Encodes a table as a JSON object keyed by attribute name.
pub fn encode_table(table: &AttributeTable) -> Result<Map<String, JsonValue>, EncodeError> {
    table
        .iter()
        .map(|attr| Ok((attr.name.clone(), encode_value(&attr.name, &attr.value)?)))
        .collect()
}

impl Serialize for AttributeTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_table(self)
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::parse_file;
    use crate::attributes::build_table;
    use crate::source::SourceFile;
    use serde_json::json;

    fn table(source: &str) -> AttributeTable {
        let file = SourceFile::new("main.tf", source);
        let (body, _) = parse_file(&file);
        let body = body.unwrap();
        let (table, diags) = build_table(body.attributes(), &file);
        assert!(diags.is_empty(), "{:?}", diags);
        table
    }

    #[test]
    fn test_scalars() {
        let table = table(
            "flag = true\nunused = 1\nratio = 12.5\nwhole = 2.0\nid = data.x.y\nnothing = null\n",
        );
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            json!({
                "flag": true,
                "unused": 1,
                "ratio": 12.5,
                "whole": 2.0,
                "id": "data.x.y",
                "nothing": null,
            })
        );
        assert!(json["unused"].is_i64());
        assert!(json["whole"].is_f64());
    }

    #[test]
    fn test_float_keeps_decimal_point() {
        let text = serde_json::to_string(&table("whole = 2.0\n")).unwrap();
        assert_eq!(text, r#"{"whole":2.0}"#);
    }

    #[test]
    fn test_float_extremes_keep_decimal_point() {
        let text = serde_json::to_string(&table(
            "a = 1e20\nb = \"0.00001\"\nc = 1e16\nd = -2.5e-7\n",
        ))
        .unwrap();
        assert_eq!(text, r#"{"a":1.0e20,"b":1.0e-5,"c":1.0e16,"d":-2.5e-7}"#);

        let decoded: JsonValue = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded["a"].as_f64(), Some(1e20));
        assert_eq!(decoded["b"].as_f64(), Some(0.00001));
        assert!(decoded["c"].is_f64());
    }

    #[test]
    fn test_keys_are_ordered() {
        let text = serde_json::to_string(&table("b = 1\na = 2\n")).unwrap();
        assert_eq!(text, r#"{"a":2,"b":1}"#);
    }

    #[test]
    fn test_non_finite_float_fails_table() {
        let table = table("ok = 1\nbig = \"inf\"\n");
        let err = encode_table(&table).unwrap_err();
        assert_eq!(err.key, "big");
        assert!(err.to_string().starts_with("failed to encode attribute to JSON"));

        let err = serde_json::to_string(&table).unwrap_err();
        assert!(err.to_string().contains("\"big\""));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(
            serde_json::to_value(AttributeTable::new()).unwrap(),
            json!({})
        );
    }
}
