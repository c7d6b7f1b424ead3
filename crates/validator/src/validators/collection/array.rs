//! Array schema

use std::borrow::Cow;

use serde_json::Value;

use super::{LengthCheck, SizeChecks, check_length};
use crate::foundation::{Outcome, ParseContext, Validate};
use crate::schema::Schema;
use crate::validators::{mismatch, require};

/// Schema for arrays whose elements all match one schema.
///
/// Size constraints are checked first; each violated one is a separate
/// issue. Element issues carry the element's index.
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use serde_json::json;
///
/// let tags = array(string()).min(1);
///
/// let issues = tags.safe_parse(&json!([])).issues().cloned().unwrap();
/// assert_eq!(issues.as_slice()[0].message, "Array must contain at least 1 element(s)");
///
/// let issues = tags.safe_parse(&json!(["ok", 2])).issues().cloned().unwrap();
/// assert_eq!(issues.as_slice()[0].path.to_string(), "[1]");
/// ```
#[derive(Debug, Clone)]
pub struct ArraySchema {
    element: Schema,
    size: SizeChecks,
}

impl ArraySchema {
    /// An array of `element`.
    pub fn new(element: impl Into<Schema>) -> Self {
        Self {
            element: element.into(),
            size: SizeChecks::default(),
        }
    }

    /// The element schema.
    #[must_use]
    pub fn element(&self) -> &Schema {
        &self.element
    }

    /// Same constraints over a different element schema.
    #[must_use]
    pub fn map_element(&self, f: impl FnOnce(&Schema) -> Schema) -> Self {
        Self {
            element: f(&self.element),
            size: self.size.clone(),
        }
    }

    /// At least `min` elements.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(mut self, min: usize) -> Self {
        self.size.push(LengthCheck::Min(min));
        self
    }

    /// At most `max` elements.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(mut self, max: usize) -> Self {
        self.size.push(LengthCheck::Max(max));
        self
    }

    /// Exactly `length` elements.
    #[must_use = "builder methods must be chained or built"]
    pub fn length(mut self, length: usize) -> Self {
        self.size.push(LengthCheck::Exact(length));
        self
    }

    /// At least one element.
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

impl Validate for ArraySchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        let value = require(input, "array", self.size.type_message.as_ref(), ctx)?;
        let Value::Array(items) = value else {
            return Err(mismatch("array", value, self.size.type_message.as_ref(), ctx));
        };

        let checkpoint = ctx.issue_count();
        check_length(&self.size.checks, "Array", items.len(), ctx);

        let mut output = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let outcome = ctx.scoped(index, |ctx| self.element.validate(Some(item), ctx));
            if let Ok(parsed) = outcome {
                output.push(parsed.unwrap_or(Value::Null));
            }
        }
        ctx.settle(checkpoint, Value::Array(output))
    }

    fn name(&self) -> &str {
        "array"
    }
}

/// Creates an array schema.
pub fn array(element: impl Into<Schema>) -> ArraySchema {
    ArraySchema::new(element)
}
