//! Record schema

use serde_json::{Map, Value};

use crate::foundation::{Outcome, ParseContext, Validate};
use crate::schema::Schema;
use crate::validators::{mismatch, require};

/// Schema for objects used as dictionaries: every value matches one schema,
/// and optionally every key matches another.
///
/// Issues carry the offending key. Entries keep their input order.
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use serde_json::json;
///
/// let scores = record(number().nonnegative());
/// assert!(scores.safe_parse(&json!({ "alice": 3, "bob": 0 })).is_success());
///
/// let issues = scores.safe_parse(&json!({ "alice": -1 })).issues().cloned().unwrap();
/// assert_eq!(issues.as_slice()[0].path.to_string(), "alice");
/// ```
#[derive(Debug, Clone)]
pub struct RecordSchema {
    key: Option<Schema>,
    value: Schema,
}

impl RecordSchema {
    /// A record whose values match `value`.
    pub fn new(value: impl Into<Schema>) -> Self {
        Self {
            key: None,
            value: value.into(),
        }
    }

    /// Also validates every key, given as a JSON string, against `key`.
    #[must_use = "builder methods must be chained or built"]
    pub fn keys(mut self, key: impl Into<Schema>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// The value schema.
    #[must_use]
    pub fn value_schema(&self) -> &Schema {
        &self.value
    }
}

impl Validate for RecordSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        let value = require(input, "object", None, ctx)?;
        let Value::Object(entries) = value else {
            return Err(mismatch("object", value, None, ctx));
        };

        let checkpoint = ctx.issue_count();
        let mut output = Map::with_capacity(entries.len());
        for (key, item) in entries {
            let (parsed_key, parsed_value) = ctx.scoped(key, |ctx| {
                let parsed_key = match &self.key {
                    Some(schema) => schema.validate(Some(&Value::String(key.clone())), ctx),
                    None => Ok(None),
                };
                (parsed_key, self.value.validate(Some(item), ctx))
            });
            if let (Ok(parsed_key), Ok(Some(parsed_value))) = (parsed_key, parsed_value) {
                let output_key = match parsed_key {
                    Some(Value::String(s)) => s,
                    _ => key.clone(),
                };
                output.insert(output_key, parsed_value);
            }
        }
        ctx.settle(checkpoint, Value::Object(output))
    }

    fn name(&self) -> &str {
        "record"
    }
}

/// Creates a record schema.
pub fn record(value: impl Into<Schema>) -> RecordSchema {
    RecordSchema::new(value)
}
