//! Map schema
//!
//! JSON objects only have string keys, so a map travels as an array of
//! `[key, value]` pairs. A plain object is accepted too and read as pairs
//! with string keys; the output then stays an object.

use serde_json::{Map, Value};

use crate::foundation::{Issue, Outcome, ParseContext, Validate};
use crate::json::received_type;
use crate::schema::Schema;
use crate::validators::{mismatch, require};

/// Schema for key/value pairs with a schema for each side.
///
/// Issues are qualified by the entry index and `"key"` or `"value"`.
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use serde_json::json;
///
/// let ids = map(number().int(), string());
/// assert!(ids.safe_parse(&json!([[1, "one"], [2, "two"]])).is_success());
///
/// let issues = ids.safe_parse(&json!([[1.5, "x"]])).issues().cloned().unwrap();
/// assert_eq!(issues.as_slice()[0].path.dotted(), "0.key");
/// ```
#[derive(Debug, Clone)]
pub struct MapSchema {
    key: Schema,
    value: Schema,
}

impl MapSchema {
    /// A map from `key` to `value`.
    pub fn new(key: impl Into<Schema>, value: impl Into<Schema>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The key schema.
    #[must_use]
    pub fn key_schema(&self) -> &Schema {
        &self.key
    }

    /// The value schema.
    #[must_use]
    pub fn value_schema(&self) -> &Schema {
        &self.value
    }

    fn entry(
        &self,
        index: usize,
        key: &Value,
        value: &Value,
        ctx: &mut ParseContext<'_>,
    ) -> Option<(Value, Value)> {
        ctx.scoped(index, |ctx| {
            let key = ctx.scoped("key", |ctx| self.key.validate(Some(key), ctx));
            let value = ctx.scoped("value", |ctx| self.value.validate(Some(value), ctx));
            match (key, value) {
                (Ok(key), Ok(value)) => {
                    Some((key.unwrap_or(Value::Null), value.unwrap_or(Value::Null)))
                }
                _ => None,
            }
        })
    }
}

impl Validate for MapSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        let value = require(input, "map", None, ctx)?;
        let checkpoint = ctx.issue_count();

        match value {
            Value::Array(pairs) => {
                let mut output = Vec::with_capacity(pairs.len());
                for (index, pair) in pairs.iter().enumerate() {
                    let Some([key, value]) = pair.as_array().map(Vec::as_slice).and_then(|p| {
                        <&[Value; 2]>::try_from(p).ok()
                    }) else {
                        ctx.scoped(index, |ctx| {
                            ctx.report(Issue::type_mismatch(
                                "[key, value] pair",
                                received_type(pair),
                            ))
                        });
                        continue;
                    };
                    if let Some((key, value)) = self.entry(index, key, value, ctx) {
                        output.push(Value::Array(vec![key, value]));
                    }
                }
                ctx.settle(checkpoint, Value::Array(output))
            }
            Value::Object(entries) => {
                let mut output = Map::with_capacity(entries.len());
                for (index, (key, value)) in entries.iter().enumerate() {
                    let key = Value::String(key.clone());
                    if let Some((parsed_key, parsed_value)) = self.entry(index, &key, value, ctx)
                    {
                        let parsed_key = match parsed_key {
                            Value::String(s) => s,
                            other => other.to_string(),
                        };
                        output.insert(parsed_key, parsed_value);
                    }
                }
                ctx.settle(checkpoint, Value::Object(output))
            }
            other => Err(mismatch("map", other, None, ctx)),
        }
    }

    fn name(&self) -> &str {
        "map"
    }
}

/// Creates a map schema.
pub fn map(key: impl Into<Schema>, value: impl Into<Schema>) -> MapSchema {
    MapSchema::new(key, value)
}
