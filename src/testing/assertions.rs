//! Evaluation of body assertions
//!
//! Field access is explicit: a missing field is `MissingField`, a field of
//! the wrong JSON type is `TypeMismatch`, and only a well-typed field with
//! the wrong contents is a value error.

use serde_json::{Map, Value};

use super::config::Assertion;
use crate::common::{Error, Result};

impl Assertion {
    /// Check this assertion against a decoded response object
    pub fn check(&self, body: &Map<String, Value>) -> Result<()> {
        match self {
            Assertion::FieldPresent { field } => {
                require_field(body, field)?;
                Ok(())
            }
            Assertion::FieldEquals { field, value } => {
                let actual = require_field(body, field)?;
                expect_equal(field, value, actual)
            }
            Assertion::NonEmpty { field } => {
                if entries(body, field)?.is_empty() {
                    return Err(Error::NoEntries {
                        field: field.clone(),
                    });
                }
                Ok(())
            }
            Assertion::ContainsEntry { field, key, value } => {
                let items = entries(body, field)?;
                for (i, item) in items.iter().enumerate() {
                    let path = format!("{}[{}]", field, i);
                    let entry = item
                        .as_object()
                        .ok_or_else(|| Error::type_mismatch(&path, "object", kind_of(item)))?;
                    let candidate = entry
                        .get(key)
                        .ok_or_else(|| Error::missing_field(&format!("{}.{}", path, key)))?;
                    if json_eq(candidate, value) {
                        return Ok(());
                    }
                }
                Err(Error::EntryNotFound {
                    field: field.clone(),
                    key: key.clone(),
                    value: value.to_string(),
                })
            }
        }
    }

    /// Short human-readable description for progress output
    pub fn describe(&self) -> String {
        match self {
            Assertion::FieldPresent { field } => format!("{} present", field),
            Assertion::FieldEquals { field, value } => format!("{} == {}", field, value),
            Assertion::NonEmpty { field } => format!("{} not empty", field),
            Assertion::ContainsEntry { field, key, value } => {
                format!("{} contains {} == {}", field, key, value)
            }
        }
    }
}

fn require_field<'a>(body: &'a Map<String, Value>, field: &str) -> Result<&'a Value> {
    body.get(field).ok_or_else(|| Error::missing_field(field))
}

/// The array stored under `field`; absent means nothing was returned
fn entries<'a>(body: &'a Map<String, Value>, field: &str) -> Result<&'a Vec<Value>> {
    let value = body.get(field).ok_or_else(|| Error::NoEntries {
        field: field.to_string(),
    })?;
    value
        .as_array()
        .ok_or_else(|| Error::type_mismatch(field, "array", kind_of(value)))
}

fn expect_equal(field: &str, expected: &Value, actual: &Value) -> Result<()> {
    if kind_of(expected) != kind_of(actual) {
        return Err(Error::type_mismatch(field, kind_of(expected), kind_of(actual)));
    }
    if !json_eq(expected, actual) {
        return Err(Error::value_mismatch(field, expected, actual));
    }
    Ok(())
}

/// JSON equality where numbers compare by value (`1` equals `1.0`)
fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                return x == y;
            }
            if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                return x == y;
            }
            match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
        _ => a == b,
    }
}

/// JSON type name used in diagnostics
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
