//! Object schema and its modifiers
//!
//! Fields are validated in declaration order and the parsed object keeps that
//! order. Keys the schema does not declare are handled by an
//! [`UnknownKeys`] policy.
//!
//! Modifiers never mutate: `pick`, `omit`, `partial`, `required`, `extend`
//! and `merge` each return a new schema sharing the field schemas.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::literal::EnumSchema;
use super::{mismatch, require};
use crate::combinators::OptionalSchema;
use crate::foundation::{Issue, IssueKind, Outcome, ParseContext, Validate};
use crate::schema::{Schema, SchemaKind};

// ============================================================================
// UNKNOWN KEY POLICY
// ============================================================================

/// What to do with keys an object schema does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeys {
    /// Drop them from the output.
    #[default]
    Strip,
    /// Keep them in the output unvalidated.
    Passthrough,
    /// Reject the object with one `UnrecognizedKey` issue.
    Strict,
}

// ============================================================================
// OBJECT SCHEMA
// ============================================================================

/// Schema for objects with named fields.
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use serde_json::json;
///
/// let user = object()
///     .field("username", string().min(3))
///     .field("email", string().email())
///     .field("age", number().optional());
///
/// let parsed = user.parse(&json!({
///     "username": "john",
///     "email": "john@example.com",
///     "extra": true,
/// })).unwrap();
///
/// // unknown keys are stripped by default
/// assert_eq!(parsed, json!({ "username": "john", "email": "john@example.com" }));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: IndexMap<String, Schema>,
    unknown_keys: Option<UnknownKeys>,
}

impl ObjectSchema {
    /// An object without fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a field.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.fields.insert(name.into(), schema.into());
        self
    }

    /// All declared fields, in declaration order.
    #[must_use]
    pub fn shape(&self) -> &IndexMap<String, Schema> {
        &self.fields
    }

    /// The schema of one field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.fields.get(name)
    }

    /// Declared field names, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The explicit unknown-key policy, if one was set.
    #[must_use]
    pub fn unknown_keys(&self) -> Option<UnknownKeys> {
        self.unknown_keys
    }

    fn with_fields(&self, fields: IndexMap<String, Schema>) -> Self {
        Self {
            fields,
            unknown_keys: self.unknown_keys,
        }
    }

    /// Only the named fields; names that are not declared are ignored.
    #[must_use]
    pub fn pick<I, K>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        self.with_fields(
            self.fields
                .iter()
                .filter(|(name, _)| keys.iter().any(|k| k.as_ref() == name.as_str()))
                .map(|(name, schema)| (name.clone(), schema.clone()))
                .collect(),
        )
    }

    /// Every field except the named ones.
    #[must_use]
    pub fn omit<I, K>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        self.with_fields(
            self.fields
                .iter()
                .filter(|(name, _)| !keys.iter().any(|k| k.as_ref() == name.as_str()))
                .map(|(name, schema)| (name.clone(), schema.clone()))
                .collect(),
        )
    }

    /// Every field becomes optional.
    #[must_use]
    pub fn partial(&self) -> Self {
        self.with_fields(
            self.fields
                .iter()
                .map(|(name, schema)| (name.clone(), make_optional(schema)))
                .collect(),
        )
    }

    /// [`partial`](Self::partial) applied recursively to nested objects,
    /// including objects inside arrays, tuples and nullable fields.
    #[must_use]
    pub fn deep_partial(&self) -> Self {
        self.with_fields(
            self.fields
                .iter()
                .map(|(name, schema)| (name.clone(), make_optional(&schema.deep_partial())))
                .collect(),
        )
    }

    /// Every field becomes required again; outer `optional` wrappers are
    /// removed.
    #[must_use]
    pub fn required(&self) -> Self {
        self.with_fields(
            self.fields
                .iter()
                .map(|(name, schema)| (name.clone(), schema.unwrap_optional()))
                .collect(),
        )
    }

    /// Adds fields; a field with an existing name replaces the old one.
    #[must_use]
    pub fn extend<I, K, S>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Schema>,
    {
        let mut merged = self.fields.clone();
        for (name, schema) in fields {
            merged.insert(name.into(), schema.into());
        }
        self.with_fields(merged)
    }

    /// Fields of both objects; on collisions `other` wins, and the result
    /// takes `other`'s unknown-key policy.
    #[must_use]
    pub fn merge(&self, other: &ObjectSchema) -> Self {
        let mut merged = self.fields.clone();
        for (name, schema) in &other.fields {
            merged.insert(name.clone(), schema.clone());
        }
        Self {
            fields: merged,
            unknown_keys: other.unknown_keys,
        }
    }

    /// Rejects undeclared keys.
    #[must_use = "builder methods must be chained or built"]
    pub fn strict(mut self) -> Self {
        self.unknown_keys = Some(UnknownKeys::Strict);
        self
    }

    /// Keeps undeclared keys in the output.
    #[must_use = "builder methods must be chained or built"]
    pub fn passthrough(mut self) -> Self {
        self.unknown_keys = Some(UnknownKeys::Passthrough);
        self
    }

    /// Drops undeclared keys from the output.
    #[must_use = "builder methods must be chained or built"]
    pub fn strip(mut self) -> Self {
        self.unknown_keys = Some(UnknownKeys::Strip);
        self
    }

    /// An enum of the declared field names.
    #[must_use]
    pub fn keyof(&self) -> EnumSchema {
        EnumSchema::new(self.fields.keys().cloned())
    }
}

fn make_optional(schema: &Schema) -> Schema {
    match schema.kind() {
        SchemaKind::Optional(_) => schema.clone(),
        _ => OptionalSchema::new(schema.clone()).into(),
    }
}

impl Validate for ObjectSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        let value = require(input, "object", None, ctx)?;
        let Value::Object(map) = value else {
            return Err(mismatch("object", value, None, ctx));
        };

        let checkpoint = ctx.issue_count();
        let mut output = Map::with_capacity(self.fields.len());
        for (name, schema) in &self.fields {
            let outcome = ctx.scoped(name, |ctx| schema.validate(map.get(name), ctx));
            if let Ok(Some(parsed)) = outcome {
                output.insert(name.clone(), parsed);
            }
        }

        let policy = self
            .unknown_keys
            .unwrap_or(ctx.options().unknown_keys);
        let mut unknown = map.keys().filter(|key| !self.fields.contains_key(*key));
        match policy {
            UnknownKeys::Strip => {}
            UnknownKeys::Passthrough => {
                for key in unknown {
                    output.insert(key.clone(), map[key].clone());
                }
            }
            UnknownKeys::Strict => {
                let first = unknown.next();
                if let Some(first) = first {
                    let keys: Vec<&String> = std::iter::once(first).chain(unknown).collect();
                    let listed = keys
                        .iter()
                        .map(|key| format!("'{key}'"))
                        .collect::<Vec<_>>()
                        .join(", ");
                    ctx.report(
                        Issue::new(
                            IssueKind::UnrecognizedKey,
                            format!("Unrecognized key(s) in object: {listed}"),
                        )
                        .with_param(
                            "keys",
                            keys.iter()
                                .map(|key| key.as_str())
                                .collect::<Vec<_>>()
                                .join(", "),
                        ),
                    );
                }
            }
        }

        ctx.settle(checkpoint, Value::Object(output))
    }

    fn name(&self) -> &str {
        "object"
    }
}

/// Creates an object schema without fields.
#[must_use]
pub fn object() -> ObjectSchema {
    ObjectSchema::new()
}

// ============================================================================
// TESTS
// ============================================================================
