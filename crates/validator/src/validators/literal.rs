//! Exact-value schemas: literal, enum, null, any, unknown, never

use std::borrow::Cow;

use serde_json::Value;

use super::{mismatch, require};
use crate::foundation::{Issue, IssueKind, Outcome, ParseContext, SchemaError, Validate};
use crate::json::{json_eq, quote_options, quote_received, received_type};

// ============================================================================
// LITERAL
// ============================================================================

/// Schema accepting exactly one value.
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use serde_json::json;
///
/// let status = literal("success");
/// assert!(status.safe_parse(&json!("success")).is_success());
///
/// let issues = status.safe_parse(&json!("failed")).issues().cloned().unwrap();
/// assert_eq!(issues.as_slice()[0].message, r#"Invalid literal value, expected "success""#);
/// ```
#[derive(Debug, Clone)]
pub struct LiteralSchema {
    value: Value,
    message: Option<Cow<'static, str>>,
}

impl LiteralSchema {
    /// A schema accepting `value` only.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            message: None,
        }
    }

    /// The accepted value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Replaces the mismatch message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Validate for LiteralSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        let value = require(input, received_type(&self.value), self.message.as_ref(), ctx)?;
        if json_eq(value, &self.value) {
            return Ok(Some(value.clone()));
        }
        Err(ctx.report(
            Issue::new(
                IssueKind::InvalidValue,
                format!("Invalid literal value, expected {}", self.value),
            )
            .with_param("expected", self.value.to_string())
            .with_param("received", value.to_string())
            .with_message_override(self.message.as_ref()),
        ))
    }

    fn name(&self) -> &str {
        "literal"
    }
}

/// Creates a literal schema.
pub fn literal(value: impl Into<Value>) -> LiteralSchema {
    LiteralSchema::new(value)
}

// ============================================================================
// ENUM
// ============================================================================

/// Schema accepting one of a fixed set of strings or numbers.
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use serde_json::json;
///
/// let role = enumeration(["admin", "user", "guest"]);
/// assert!(role.safe_parse(&json!("admin")).is_success());
///
/// let issues = role.safe_parse(&json!("root")).issues().cloned().unwrap();
/// assert_eq!(
///     issues.as_slice()[0].message,
///     "Invalid enum value. Expected 'admin' | 'user' | 'guest', received 'root'"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct EnumSchema {
    options: Vec<Value>,
    message: Option<Cow<'static, str>>,
}

impl EnumSchema {
    /// A string enum.
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options
                .into_iter()
                .map(|option| Value::String(option.into()))
                .collect(),
            message: None,
        }
    }

    /// An enum over arbitrary strings and numbers.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidEnumValue`] for any other kind of value.
    pub fn from_values(options: impl IntoIterator<Item = Value>) -> Result<Self, SchemaError> {
        let options = options
            .into_iter()
            .map(|option| match option {
                Value::String(_) | Value::Number(_) => Ok(option),
                other => Err(SchemaError::InvalidEnumValue {
                    value: other.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            options,
            message: None,
        })
    }

    /// The accepted values, in declaration order.
    #[must_use]
    pub fn options(&self) -> &[Value] {
        &self.options
    }

    /// A new enum keeping only the listed options.
    #[must_use]
    pub fn extract<I, S>(&self, keep: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Value>,
    {
        let keep: Vec<Value> = keep.into_iter().map(Into::into).collect();
        self.filtered(|option| keep.iter().any(|k| json_eq(k, option)))
    }

    /// A new enum without the listed options.
    #[must_use]
    pub fn exclude<I, S>(&self, drop: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Value>,
    {
        let drop: Vec<Value> = drop.into_iter().map(Into::into).collect();
        self.filtered(|option| !drop.iter().any(|d| json_eq(d, option)))
    }

    fn filtered(&self, keep: impl Fn(&Value) -> bool) -> Self {
        Self {
            options: self.options.iter().filter(|o| keep(o)).cloned().collect(),
            message: self.message.clone(),
        }
    }

    /// Replaces the mismatch message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Validate for EnumSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        let expected = quote_options(&self.options);
        let value = match input {
            Some(value) => value,
            None => {
                return Err(ctx.report(
                    Issue::missing_required(expected).with_message_override(self.message.as_ref()),
                ));
            }
        };
        if !matches!(value, Value::String(_) | Value::Number(_)) {
            return Err(ctx.report(
                Issue::type_mismatch(expected, received_type(value))
                    .with_message_override(self.message.as_ref()),
            ));
        }
        if self.options.iter().any(|option| json_eq(option, value)) {
            return Ok(Some(value.clone()));
        }
        let received = quote_received(value);
        Err(ctx.report(
            Issue::new(
                IssueKind::InvalidValue,
                format!("Invalid enum value. Expected {expected}, received {received}"),
            )
            .with_param("options", expected)
            .with_param("received", received)
            .with_message_override(self.message.as_ref()),
        ))
    }

    fn name(&self) -> &str {
        "enum"
    }
}

/// Creates a string enum schema.
pub fn enumeration<I, S>(options: I) -> EnumSchema
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    EnumSchema::new(options)
}

// ============================================================================
// NULL, ANY, UNKNOWN, NEVER
// ============================================================================

/// Schema accepting `null` only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSchema;

impl Validate for NullSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        match require(input, "null", None, ctx)? {
            Value::Null => Ok(Some(Value::Null)),
            other => Err(mismatch("null", other, None, ctx)),
        }
    }

    fn name(&self) -> &str {
        "null"
    }
}

/// Creates a null schema.
#[must_use]
pub fn null() -> NullSchema {
    NullSchema
}

/// Schema accepting every value, and absence.
///
/// `any` and `unknown` validate identically; they differ only in name.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnySchema {
    unknown: bool,
}

impl AnySchema {
    /// `"any"` or `"unknown"`.
    #[must_use]
    pub fn label(&self) -> &'static str {
        if self.unknown { "unknown" } else { "any" }
    }
}

impl Validate for AnySchema {
    fn validate(&self, input: Option<&Value>, _ctx: &mut ParseContext<'_>) -> Outcome {
        Ok(input.cloned())
    }

    fn name(&self) -> &str {
        self.label()
    }
}

/// Creates a schema accepting anything.
#[must_use]
pub fn any() -> AnySchema {
    AnySchema { unknown: false }
}

/// Creates a schema accepting anything.
#[must_use]
pub fn unknown() -> AnySchema {
    AnySchema { unknown: true }
}

/// Schema rejecting every value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverSchema;

impl Validate for NeverSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        let value = require(input, "never", None, ctx)?;
        Err(mismatch("never", value, None, ctx))
    }

    fn name(&self) -> &str {
        "never"
    }
}

/// Creates a schema that rejects everything.
#[must_use]
pub fn never() -> NeverSchema {
    NeverSchema
}

// ============================================================================
// TESTS
// ============================================================================
