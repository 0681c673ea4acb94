//! Lenient field access over loosely-typed JSON records.
//!
//! Product documents come from an admin UI and several generations of
//! import scripts, so numbers show up as strings, arrays go missing, and
//! the same field appears under more than one name. Decoding never fails;
//! unusable values fall back to their zero value.

use serde_json::{Map, Value};

/// Borrowed view over a JSON object with forgiving accessors.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Fields<'a> {
    /// Wrap a JSON value. Non-objects behave like an empty object.
    pub fn new(value: &'a Value) -> Self {
        Self {
            map: value.as_object(),
        }
    }

    /// Raw value under the first present, non-null key.
    pub fn get(&self, keys: &[&str]) -> Option<&'a Value> {
        let map = self.map?;
        keys.iter()
            .filter_map(|k| map.get(*k))
            .find(|v| !v.is_null())
    }

    /// First non-empty string among the keys. Numbers are stringified.
    pub fn string(&self, keys: &[&str]) -> Option<String> {
        let map = self.map?;
        keys.iter().find_map(|k| match map.get(*k)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// String or empty.
    pub fn string_or_default(&self, keys: &[&str]) -> String {
        self.string(keys).unwrap_or_default()
    }

    /// Number, coercing numeric strings; None when absent or unparseable.
    pub fn number(&self, keys: &[&str]) -> Option<f64> {
        self.get(keys).and_then(coerce_number)
    }

    /// Number or zero.
    pub fn number_or_zero(&self, keys: &[&str]) -> f64 {
        self.number(keys).unwrap_or(0.0)
    }

    /// Truthiness of a field: booleans as-is, non-zero numbers, "true".
    pub fn flag(&self, keys: &[&str]) -> Option<bool> {
        self.get(keys).map(truthy)
    }

    /// Array elements, or an empty slice when absent or not an array.
    pub fn array(&self, keys: &[&str]) -> &'a [Value] {
        self.get(keys)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the field is present as an array (possibly empty).
    pub fn has_array(&self, keys: &[&str]) -> bool {
        self.get(keys).is_some_and(Value::is_array)
    }

    /// Array of strings, skipping non-string entries.
    pub fn strings(&self, keys: &[&str]) -> Vec<String> {
        self.array(keys)
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    }
}

/// Interpret a JSON value as a finite number.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Loose truthiness, matching how form payloads encode booleans.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "false" && s != "0",
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}
