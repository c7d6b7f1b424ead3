//! OPTIONAL, NULLABLE and DEFAULT wrappers

use serde_json::Value;

use crate::foundation::{Outcome, ParseContext, Validate};
use crate::schema::Schema;

// ============================================================================
// OPTIONAL
// ============================================================================

/// Accepts an absent value; anything present goes to the inner schema.
#[derive(Debug, Clone)]
pub struct OptionalSchema {
    inner: Schema,
}

impl OptionalSchema {
    /// Wraps `inner`.
    pub fn new(inner: impl Into<Schema>) -> Self {
        Self {
            inner: inner.into(),
        }
    }

    /// The wrapped schema.
    #[must_use]
    pub fn inner(&self) -> &Schema {
        &self.inner
    }
}

impl Validate for OptionalSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        match input {
            None => Ok(None),
            Some(value) => self.inner.validate(Some(value), ctx),
        }
    }

    fn name(&self) -> &str {
        "optional"
    }
}

/// Makes `schema` accept an absent value.
pub fn optional(schema: impl Into<Schema>) -> Schema {
    OptionalSchema::new(schema).into()
}

// ============================================================================
// NULLABLE
// ============================================================================

/// Accepts `null`; anything else goes to the inner schema.
#[derive(Debug, Clone)]
pub struct NullableSchema {
    inner: Schema,
}

impl NullableSchema {
    /// Wraps `inner`.
    pub fn new(inner: impl Into<Schema>) -> Self {
        Self {
            inner: inner.into(),
        }
    }

    /// The wrapped schema.
    #[must_use]
    pub fn inner(&self) -> &Schema {
        &self.inner
    }
}

impl Validate for NullableSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        match input {
            Some(Value::Null) => Ok(Some(Value::Null)),
            other => self.inner.validate(other, ctx),
        }
    }

    fn name(&self) -> &str {
        "nullable"
    }
}

/// Makes `schema` accept `null`.
pub fn nullable(schema: impl Into<Schema>) -> Schema {
    NullableSchema::new(schema).into()
}

/// Makes `schema` accept both `null` and absence.
pub fn nullish(schema: impl Into<Schema>) -> Schema {
    optional(nullable(schema))
}

// ============================================================================
// DEFAULT
// ============================================================================

/// Replaces an absent value with a default, which is then validated like any
/// other input.
#[derive(Debug, Clone)]
pub struct WithDefaultSchema {
    inner: Schema,
    default: Value,
}

impl WithDefaultSchema {
    /// Wraps `inner`, substituting `default` for absence.
    pub fn new(inner: impl Into<Schema>, default: impl Into<Value>) -> Self {
        Self {
            inner: inner.into(),
            default: default.into(),
        }
    }

    /// The wrapped schema.
    #[must_use]
    pub fn inner(&self) -> &Schema {
        &self.inner
    }

    /// The substituted value.
    #[must_use]
    pub fn default_value(&self) -> &Value {
        &self.default
    }
}

impl Validate for WithDefaultSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        self.inner.validate(Some(input.unwrap_or(&self.default)), ctx)
    }

    fn name(&self) -> &str {
        "default"
    }
}

/// Substitutes `default` when the input is absent.
pub fn with_default(schema: impl Into<Schema>, default: impl Into<Value>) -> Schema {
    WithDefaultSchema::new(schema, default).into()
}
