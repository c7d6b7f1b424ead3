//! Tuple schema

use serde_json::Value;

use crate::foundation::{Issue, Outcome, ParseContext, Validate};
use crate::schema::Schema;
use crate::validators::{mismatch, require};

/// Schema for fixed-length arrays with one schema per position.
///
/// A wrong number of elements is reported as a single issue and the
/// positions are not validated. With [`rest`](Self::rest), any number of
/// extra elements is accepted, each validated against the rest schema.
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use serde_json::json;
///
/// let point = tuple([Schema::from(number()), number().into()]);
/// assert!(point.safe_parse(&json!([1.5, -2])).is_success());
///
/// let issues = point.safe_parse(&json!([1, 2, 3])).issues().cloned().unwrap();
/// assert_eq!(issues.len(), 1);
/// assert_eq!(issues.as_slice()[0].message, "Array must contain at most 2 element(s)");
/// ```
#[derive(Debug, Clone)]
pub struct TupleSchema {
    items: Vec<Schema>,
    rest: Option<Schema>,
}

impl TupleSchema {
    /// A tuple with the given positions.
    pub fn new(items: impl IntoIterator<Item = Schema>) -> Self {
        Self {
            items: items.into_iter().collect(),
            rest: None,
        }
    }

    /// Accepts extra elements matching `rest`.
    #[must_use = "builder methods must be chained or built"]
    pub fn rest(mut self, rest: impl Into<Schema>) -> Self {
        self.rest = Some(rest.into());
        self
    }

    /// The positional schemas.
    #[must_use]
    pub fn items(&self) -> &[Schema] {
        &self.items
    }

    /// Same shape with every position and the rest schema mapped by `f`.
    #[must_use]
    pub fn map_items(&self, f: impl Fn(&Schema) -> Schema) -> Self {
        Self {
            items: self.items.iter().map(&f).collect(),
            rest: self.rest.as_ref().map(&f),
        }
    }
}

impl Validate for TupleSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        let value = require(input, "array", None, ctx)?;
        let Value::Array(elements) = value else {
            return Err(mismatch("array", value, None, ctx));
        };

        let arity = self.items.len();
        if elements.len() < arity {
            return Err(ctx.report(Issue::too_small(
                format!("Array must contain at least {arity} element(s)"),
                arity,
            )));
        }
        if self.rest.is_none() && elements.len() > arity {
            return Err(ctx.report(Issue::too_big(
                format!("Array must contain at most {arity} element(s)"),
                arity,
            )));
        }

        let checkpoint = ctx.issue_count();
        let mut output = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            let Some(schema) = self.items.get(index).or(self.rest.as_ref()) else {
                break;
            };
            let outcome = ctx.scoped(index, |ctx| schema.validate(Some(element), ctx));
            if let Ok(parsed) = outcome {
                output.push(parsed.unwrap_or(Value::Null));
            }
        }
        ctx.settle(checkpoint, Value::Array(output))
    }

    fn name(&self) -> &str {
        "tuple"
    }
}

/// Creates a tuple schema.
pub fn tuple(items: impl IntoIterator<Item = Schema>) -> TupleSchema {
    TupleSchema::new(items)
}
