//! JSON value helpers shared by the schema builders.
//!
//! # Examples
//!
//! ```
//! use sieve_validator::json::{quote_options, received_type};
//! use serde_json::json;
//!
//! assert_eq!(received_type(&json!([1, 2])), "array");
//! assert_eq!(quote_options(&[json!("A"), json!(2)]), "'A' | 2");
//! ```

use serde_json::{Number, Value};

/// Name of the JSON type of `value`, as used in "received" messages.
#[must_use]
pub fn received_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A stable key identifying `value` by content.
///
/// Equal keys mean equal values, so the key can index hash maps of
/// discriminants or detect duplicate set members. Objects are compared in
/// field order. Numbers are compared by value: `1` and `1.0` share a key.
#[must_use]
pub fn canonical_key(value: &Value) -> String {
    let mut key = String::new();
    write_key(value, &mut key);
    key
}

fn write_key(value: &Value, out: &mut String) {
    match value {
        Value::Number(n) => out.push_str(&number_key(n)),
        Value::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_key(item, out);
            }
            out.push(']');
        }
        Value::Object(fields) => {
            out.push('{');
            for (index, (name, field)) in fields.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                out.push_str(&Value::from(name.as_str()).to_string());
                out.push(':');
                write_key(field, out);
            }
            out.push('}');
        }
        other => out.push_str(&other.to_string()),
    }
}

// Integral floats inside the exactly representable range render as integers.
fn number_key(n: &Number) -> String {
    const SAFE: f64 = 9_007_199_254_740_992.0;
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < SAFE => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

/// Structural equality where numbers compare by value, as JSON has a single
/// number type.
#[must_use]
pub fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y || x.as_f64() == y.as_f64(),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(name, x)| ys.get(name).is_some_and(|y| json_eq(x, y)))
        }
        _ => a == b,
    }
}

/// Renders `value` the way option lists show it: strings in single quotes,
/// everything else as JSON.
#[must_use]
pub fn quote_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}

/// Renders a set of options as `'A' | 'B' | 3`.
#[must_use]
pub fn quote_options(values: &[Value]) -> String {
    values
        .iter()
        .map(quote_value)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Renders a received value for enum messages: always in single quotes.
pub(crate) fn quote_received(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{s}'"),
        other => format!("'{other}'"),
    }
}
