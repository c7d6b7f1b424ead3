//! REFINE and TRANSFORM combinators
//!
//! Both run the base schema first and only touch the parsed value when the
//! base accepted it. An absent value accepted by an optional base passes
//! through untouched.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::foundation::{Issue, IssueKind, Outcome, ParseContext, Path, Validate};
use crate::schema::Schema;

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;
type Mapping = Arc<dyn Fn(Value) -> Value + Send + Sync>;

// ============================================================================
// REFINE
// ============================================================================

/// A base schema plus a predicate over its parsed output.
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use serde_json::json;
///
/// let signup = object()
///     .field("password", string().min(8))
///     .field("confirm", string())
///     .refine_at(
///         |v| v["password"] == v["confirm"],
///         "Passwords don't match",
///         ["confirm"],
///     );
///
/// let issues = signup
///     .safe_parse(&json!({ "password": "hunter22", "confirm": "hunter2" }))
///     .issues()
///     .cloned()
///     .unwrap();
/// assert_eq!(issues.as_slice()[0].path.dotted(), "confirm");
/// ```
#[derive(Clone)]
pub struct RefinedSchema {
    base: Schema,
    predicate: Predicate,
    message: Cow<'static, str>,
    path: Path,
}

impl RefinedSchema {
    /// Refines `base` with `predicate`.
    pub fn new<F>(
        base: impl Into<Schema>,
        predicate: F,
        message: impl Into<Cow<'static, str>>,
    ) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            base: base.into(),
            predicate: Arc::new(predicate),
            message: message.into(),
            path: Path::root(),
        }
    }

    /// Reports the failure at `path`, relative to the refined value.
    #[must_use = "builder methods must be chained or built"]
    pub fn at(mut self, path: Path) -> Self {
        self.path = path;
        self
    }

    /// The schema that runs before the predicate.
    #[must_use]
    pub fn base(&self) -> &Schema {
        &self.base
    }
}

impl fmt::Debug for RefinedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefinedSchema")
            .field("base", &self.base)
            .field("message", &self.message)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Validate for RefinedSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        match self.base.validate(input, ctx)? {
            Some(parsed) if !(self.predicate)(&parsed) => Err(ctx.report(
                Issue::new(IssueKind::RefinementFailed, self.message.clone()).at(self.path.clone()),
            )),
            outcome => Ok(outcome),
        }
    }

    fn name(&self) -> &str {
        "refine"
    }
}

/// Adds `predicate` to `schema`; a rejection reports `message`.
pub fn refine<F>(
    schema: impl Into<Schema>,
    predicate: F,
    message: impl Into<Cow<'static, str>>,
) -> Schema
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    RefinedSchema::new(schema, predicate, message).into()
}

/// Like [`refine`], reporting the issue at `path` relative to the value.
pub fn refine_at<F>(
    schema: impl Into<Schema>,
    predicate: F,
    message: impl Into<Cow<'static, str>>,
    path: Path,
) -> Schema
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    RefinedSchema::new(schema, predicate, message).at(path).into()
}

// ============================================================================
// TRANSFORM
// ============================================================================

/// A base schema plus a mapping over its parsed output.
#[derive(Clone)]
pub struct TransformSchema {
    base: Schema,
    mapping: Mapping,
}

impl TransformSchema {
    /// Maps the output of `base` through `mapping`.
    pub fn new<F>(base: impl Into<Schema>, mapping: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self {
            base: base.into(),
            mapping: Arc::new(mapping),
        }
    }

    /// The schema that runs before the mapping.
    #[must_use]
    pub fn base(&self) -> &Schema {
        &self.base
    }
}

impl fmt::Debug for TransformSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformSchema")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl Validate for TransformSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        Ok(self.base.validate(input, ctx)?.map(|parsed| (self.mapping)(parsed)))
    }

    fn name(&self) -> &str {
        "transform"
    }
}

/// Maps the parsed output of `schema` through `mapping`.
pub fn transform<F>(schema: impl Into<Schema>, mapping: F) -> Schema
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    TransformSchema::new(schema, mapping).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::SchemaExt;
    use crate::validators::{object, string};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn gmail() -> Schema {
        string().email().refine(
            |v| v.as_str().is_some_and(|s| s.ends_with("@gmail.com")),
            "Email must end with @gmail.com",
        )
    }

    #[test]
    fn test_predicate_runs_after_base_success() {
        assert!(gmail().safe_parse(&json!("john@gmail.com")).is_success());
        let issues = gmail().safe_parse(&json!("john@hotmail.com")).issues().cloned().unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.as_slice()[0].kind, IssueKind::RefinementFailed);
        assert_eq!(issues.as_slice()[0].message, "Email must end with @gmail.com");
    }

    #[test]
    fn test_predicate_skipped_after_base_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let schema = string().email().refine(
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                false
            },
            "never reached",
        );

        let issues = schema.safe_parse(&json!("not-an-email")).issues().cloned().unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.as_slice()[0].message, "Invalid email");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_absent_value_skips_predicate() {
        let schema = object().field("nick", string().optional().refine(|_| false, "no"));
        assert!(schema.safe_parse(&json!({})).is_success());
        assert!(schema.safe_parse(&json!({ "nick": "x" })).is_failure());
    }

    #[test]
    fn test_refinement_path_is_relative() {
        let schema = object().field(
            "account",
            object()
                .field("a", string())
                .field("b", string())
                .refine_at(|v| v["a"] == v["b"], "Must match", ["b"]),
        );
        let issues = schema
            .safe_parse(&json!({ "account": { "a": "x", "b": "y" } }))
            .issues()
            .cloned()
            .unwrap();
        assert_eq!(issues.as_slice()[0].path.dotted(), "account.b");
    }

    #[test]
    fn test_transform_maps_output() {
        let schema = transform(string(), |v| json!(v.as_str().map_or(0, str::len)));
        assert_eq!(schema.parse(&json!("four")).unwrap(), json!(4));
        assert!(schema.safe_parse(&json!(4)).is_failure());
    }
}
