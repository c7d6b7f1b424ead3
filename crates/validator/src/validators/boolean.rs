//! Boolean schema

use std::borrow::Cow;

use serde_json::Value;

use super::{mismatch, require};
use crate::foundation::{Outcome, ParseContext, Validate};

/// Schema accepting `true` and `false`.
///
/// With [`coerce`](Self::coerce), the strings `"true"` and `"false"` are
/// accepted as well. No other value is converted.
#[derive(Debug, Clone, Default)]
pub struct BooleanSchema {
    coerce: bool,
    type_message: Option<Cow<'static, str>>,
}

impl BooleanSchema {
    /// A boolean schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also accepts `"true"` and `"false"`.
    #[must_use = "builder methods must be chained or built"]
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    /// Replaces the type-mismatch and required messages.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.type_message = Some(message.into());
        self
    }
}

impl Validate for BooleanSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        let value = require(input, "boolean", self.type_message.as_ref(), ctx)?;
        match value {
            Value::Bool(b) => Ok(Some(Value::Bool(*b))),
            Value::String(s) if self.coerce && s == "true" => Ok(Some(Value::Bool(true))),
            Value::String(s) if self.coerce && s == "false" => Ok(Some(Value::Bool(false))),
            other => Err(mismatch("boolean", other, self.type_message.as_ref(), ctx)),
        }
    }

    fn name(&self) -> &str {
        "boolean"
    }
}

/// Creates a boolean schema.
#[must_use]
pub fn boolean() -> BooleanSchema {
    BooleanSchema::new()
}
