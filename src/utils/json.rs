//! Loose JSON value helpers
//!
//! Callers send whatever JSON they like; these helpers read it the way a
//! browser client expects: `0`, `""`, `false` and `null` count as "nothing".

use serde_json::Value;

/// Whether a JSON value counts as set
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a value as text, mapping unset values to an empty string
pub fn text_or_empty(value: Option<&Value>) -> String {
    match value {
        Some(v) if !is_truthy(v) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
