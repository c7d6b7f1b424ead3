//! Set schema

use std::borrow::Cow;
use std::collections::HashSet;

use serde_json::Value;

use super::{LengthCheck, SizeChecks, check_length};
use crate::foundation::{Outcome, ParseContext, Validate};
use crate::json::canonical_key;
use crate::schema::Schema;
use crate::validators::{mismatch, require};

/// Schema for collections of unique members, carried as arrays.
///
/// Duplicates are not an error. Members are deduplicated after parsing, so
/// values a member schema normalizes to the same output (`"a"` and `" a"`
/// under `trim`) count once. Size constraints count the distinct parsed
/// members, and the output keeps the first occurrence of each. A repeat of an
/// earlier input member is skipped without being validated again.
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use serde_json::json;
///
/// let tags = set(string()).max(2);
///
/// assert_eq!(tags.parse(&json!(["a", "b", "a"])).unwrap(), json!(["a", "b"]));
/// assert!(tags.safe_parse(&json!(["a", "b", "c"])).is_failure());
/// ```
#[derive(Debug, Clone)]
pub struct SetSchema {
    member: Schema,
    size: SizeChecks,
}

impl SetSchema {
    /// A set of `member`.
    pub fn new(member: impl Into<Schema>) -> Self {
        Self {
            member: member.into(),
            size: SizeChecks::default(),
        }
    }

    /// The member schema.
    #[must_use]
    pub fn member(&self) -> &Schema {
        &self.member
    }

    /// At least `min` distinct members.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(mut self, min: usize) -> Self {
        self.size.push(LengthCheck::Min(min));
        self
    }

    /// At most `max` distinct members.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(mut self, max: usize) -> Self {
        self.size.push(LengthCheck::Max(max));
        self
    }

    /// Exactly `size` distinct members.
    #[must_use = "builder methods must be chained or built"]
    pub fn size(mut self, size: usize) -> Self {
        self.size.push(LengthCheck::Exact(size));
        self
    }

    /// At least one member.
    #[must_use = "builder methods must be chained or built"]
    pub fn nonempty(self) -> Self {
        self.min(1)
    }

    /// Replaces the message of the most recently added constraint.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.size.set_message(message.into());
        self
    }
}

impl Validate for SetSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        let value = require(input, "set", self.size.type_message.as_ref(), ctx)?;
        let Value::Array(members) = value else {
            return Err(mismatch("set", value, self.size.type_message.as_ref(), ctx));
        };

        // Size issues come first, so members are validated on a fork.
        let mut member_ctx = ctx.fork();
        let mut seen_inputs = HashSet::with_capacity(members.len());
        let mut seen = HashSet::with_capacity(members.len());
        let mut output = Vec::with_capacity(members.len());
        let mut rejected = 0;
        for (index, member) in members.iter().enumerate() {
            if !seen_inputs.insert(canonical_key(member)) {
                continue;
            }
            let outcome = member_ctx.scoped(index, |ctx| self.member.validate(Some(member), ctx));
            match outcome {
                Ok(parsed) => {
                    let parsed = parsed.unwrap_or(Value::Null);
                    if seen.insert(canonical_key(&parsed)) {
                        output.push(parsed);
                    }
                }
                Err(_) => rejected += 1,
            }
        }

        let checkpoint = ctx.issue_count();
        check_length(&self.size.checks, "Set", output.len() + rejected, ctx);
        ctx.absorb(member_ctx);
        ctx.settle(checkpoint, Value::Array(output))
    }

    fn name(&self) -> &str {
        "set"
    }
}

/// Creates a set schema.
pub fn set(member: impl Into<Schema>) -> SetSchema {
    SetSchema::new(member)
}
