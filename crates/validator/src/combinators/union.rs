//! UNION combinator - first matching member wins
//!
//! Members are tried in declaration order, each against a forked context so
//! a failed attempt leaves no trace. When no member matches, the issues of
//! the member that came closest (fewest issues) are reported; ties go to the
//! member declared first.

use serde_json::Value;

use crate::foundation::{Issue, IssueKind, Outcome, ParseContext, Rejected, Validate};
use crate::schema::{Schema, SchemaKind};

/// Accepts a value matching any member.
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use serde_json::json;
///
/// let id = string().uuid().or(number().int().positive());
///
/// assert!(id.safe_parse(&json!(42)).is_success());
/// assert!(id.safe_parse(&json!("123e4567-e89b-12d3-a456-426614174000")).is_success());
/// assert!(id.safe_parse(&json!(-1)).is_failure());
/// ```
#[derive(Debug, Clone)]
pub struct UnionSchema {
    members: Vec<Schema>,
}

impl UnionSchema {
    /// A union of `members`.
    pub fn new(members: impl IntoIterator<Item = Schema>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }

    /// The members, in declaration order.
    #[must_use]
    pub fn members(&self) -> &[Schema] {
        &self.members
    }
}

impl Validate for UnionSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        let mut closest: Option<ParseContext<'_>> = None;

        for member in &self.members {
            let mut attempt = ctx.fork();
            match member.validate(input, &mut attempt) {
                Ok(parsed) if attempt.is_clean() => return Ok(parsed),
                _ => {}
            }
            let closer = closest
                .as_ref()
                .is_none_or(|best| attempt.issue_count() < best.issue_count());
            if closer {
                closest = Some(attempt);
            }
        }

        match closest {
            Some(best) if !best.is_clean() => {
                ctx.absorb(best);
                Err(Rejected)
            }
            _ => Err(ctx.report(Issue::new(IssueKind::TypeMismatch, "Invalid input"))),
        }
    }

    fn name(&self) -> &str {
        "union"
    }
}

/// Creates a union; the first matching member wins.
pub fn union(members: impl IntoIterator<Item = Schema>) -> Schema {
    UnionSchema::new(members).into()
}

/// `left | right`, flattening `left` when it already is a union.
pub fn or(left: impl Into<Schema>, right: impl Into<Schema>) -> Schema {
    let left = left.into();
    let mut members = match left.kind() {
        SchemaKind::Union(existing) => existing.members().to_vec(),
        _ => vec![left],
    };
    members.push(right.into());
    union(members)
}
