//! DISCRIMINATED UNION combinator - member selected by a literal field
//!
//! Construction reads the discriminant field of every member (a literal, or
//! an enum of several values) into a lookup table. Parsing reads the
//! discriminant of the input, finds the member in O(1) and validates the
//! input against that member only.

use std::collections::HashMap;

use serde_json::Value;

use crate::foundation::{Issue, IssueKind, Outcome, ParseContext, SchemaError, Validate};
use crate::json::{canonical_key, quote_options};
use crate::schema::{Schema, SchemaKind};
use crate::validators::{mismatch, require};

/// A union whose member is chosen by the value of one field.
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use serde_json::json;
///
/// let response = discriminated_union("status", [
///     object().field("status", literal("success")).field("data", string()),
///     object().field("status", literal("failed")).field("error", string()),
/// ])?;
///
/// assert!(response.safe_parse(&json!({ "status": "failed", "error": "timeout" })).is_success());
///
/// let issues = response.safe_parse(&json!({ "status": "pending" })).issues().cloned().unwrap();
/// assert_eq!(issues.len(), 1);
/// assert_eq!(
///     issues.as_slice()[0].message,
///     "Invalid discriminator value. Expected 'success' | 'failed'"
/// );
/// # Ok::<(), sieve_validator::foundation::SchemaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DiscriminatedUnionSchema {
    discriminant: String,
    members: Vec<Schema>,
    values: Vec<Value>,
    index: HashMap<String, usize>,
}

/// Literal values a member declares for `discriminant`.
fn discriminant_values(member: &Schema, discriminant: &str) -> Option<Vec<Value>> {
    let field = member.as_object()?.get(discriminant)?;
    match field.kind() {
        SchemaKind::Literal(literal) => Some(vec![literal.value().clone()]),
        SchemaKind::Enum(options) => Some(options.options().to_vec()),
        _ => None,
    }
}

impl DiscriminatedUnionSchema {
    /// Builds the lookup table.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::EmptyUnion`] without members;
    /// - [`SchemaError::NonObjectMember`] for a member that is not an object;
    /// - [`SchemaError::MissingDiscriminant`] for a member without a literal
    ///   or enum discriminant field;
    /// - [`SchemaError::DuplicateDiscriminant`] when two members share a value.
    pub fn new<I, S>(discriminant: impl Into<String>, members: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Schema>,
    {
        let discriminant = discriminant.into();
        let members: Vec<Schema> = members.into_iter().map(Into::into).collect();
        if members.is_empty() {
            return Err(SchemaError::EmptyUnion { discriminant });
        }

        let mut values = Vec::new();
        let mut index = HashMap::new();
        for (position, member) in members.iter().enumerate() {
            if member.as_object().is_none() {
                return Err(SchemaError::NonObjectMember { index: position });
            }
            let declared = discriminant_values(member, &discriminant).ok_or_else(|| {
                SchemaError::MissingDiscriminant {
                    index: position,
                    discriminant: discriminant.clone(),
                }
            })?;
            for value in declared {
                let key = canonical_key(&value);
                if let Some(&first) = index.get(&key) {
                    return Err(SchemaError::DuplicateDiscriminant {
                        value: key,
                        first,
                        second: position,
                    });
                }
                index.insert(key, position);
                values.push(value);
            }
        }

        Ok(Self {
            discriminant,
            members,
            values,
            index,
        })
    }

    /// The discriminant field name.
    #[must_use]
    pub fn discriminant(&self) -> &str {
        &self.discriminant
    }

    /// The members, in declaration order.
    #[must_use]
    pub fn members(&self) -> &[Schema] {
        &self.members
    }

    /// The member selected by `value`, if any.
    #[must_use]
    pub fn member_for(&self, value: &Value) -> Option<&Schema> {
        self.index
            .get(&canonical_key(value))
            .map(|&position| &self.members[position])
    }
}

impl Validate for DiscriminatedUnionSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        let value = require(input, "object", None, ctx)?;
        let Value::Object(fields) = value else {
            return Err(mismatch("object", value, None, ctx));
        };

        let member = fields
            .get(&self.discriminant)
            .and_then(|tag| self.member_for(tag));
        match member {
            Some(member) => member.validate(Some(value), ctx),
            None => {
                let expected = quote_options(&self.values);
                tracing::debug!(
                    discriminant = %self.discriminant,
                    received = ?fields.get(&self.discriminant),
                    "no member matches discriminant"
                );
                Err(ctx.report(
                    Issue::new(
                        IssueKind::DiscriminantMismatch,
                        format!("Invalid discriminator value. Expected {expected}"),
                    )
                    .with_param("discriminator", self.discriminant.clone())
                    .with_param("options", expected)
                    .at(std::iter::once(self.discriminant.as_str()).collect()),
                ))
            }
        }
    }

    fn name(&self) -> &str {
        "discriminated_union"
    }
}

/// Creates a discriminated union over object `members`.
pub fn discriminated_union<I, S>(
    discriminant: impl Into<String>,
    members: I,
) -> Result<DiscriminatedUnionSchema, SchemaError>
where
    I: IntoIterator<Item = S>,
    S: Into<Schema>,
{
    DiscriminatedUnionSchema::new(discriminant, members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{enumeration, literal, number, object, string};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn shapes() -> DiscriminatedUnionSchema {
        discriminated_union(
            "kind",
            [
                object().field("kind", literal("circle")).field("radius", number()),
                object()
                    .field("kind", enumeration(["square", "box"]))
                    .field("side", number()),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_selects_member_by_discriminant() {
        let schema = shapes();
        assert!(schema.safe_parse(&json!({ "kind": "circle", "radius": 1 })).is_success());
        assert!(schema.safe_parse(&json!({ "kind": "box", "side": 2 })).is_success());
    }

    #[test]
    fn test_only_selected_member_reports() {
        let issues = shapes()
            .safe_parse(&json!({ "kind": "circle", "side": 2 }))
            .issues()
            .cloned()
            .unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.as_slice()[0].path.dotted(), "radius");
    }

    #[test]
    fn test_missing_discriminant_is_one_issue_at_field() {
        let issues = shapes().safe_parse(&json!({ "radius": 1 })).issues().cloned().unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.as_slice()[0].kind, IssueKind::DiscriminantMismatch);
        assert_eq!(issues.as_slice()[0].path.dotted(), "kind");
        assert_eq!(
            issues.as_slice()[0].message,
            "Invalid discriminator value. Expected 'circle' | 'square' | 'box'"
        );
    }

    #[test]
    fn test_non_object_input() {
        let issues = shapes().safe_parse(&json!("circle")).issues().cloned().unwrap();
        assert_eq!(issues.as_slice()[0].kind, IssueKind::TypeMismatch);
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(
            discriminated_union("kind", Vec::<Schema>::new()),
            Err(SchemaError::EmptyUnion { .. })
        ));
        assert!(matches!(
            discriminated_union("kind", [string()]),
            Err(SchemaError::NonObjectMember { index: 0 })
        ));
        assert!(matches!(
            discriminated_union("kind", [object().field("kind", string())]),
            Err(SchemaError::MissingDiscriminant { index: 0, .. })
        ));
        assert!(matches!(
            discriminated_union(
                "kind",
                [
                    object().field("kind", literal("a")),
                    object().field("kind", literal("a")),
                ]
            ),
            Err(SchemaError::DuplicateDiscriminant {
                first: 0,
                second: 1,
                ..
            })
        ));
    }
}
