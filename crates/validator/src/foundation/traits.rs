//! Core traits for the validation system
//!
//! [`Validate`] is implemented by every schema builder and by [`Schema`]
//! itself. [`SchemaExt`] adds the wrapping combinators (`optional`, `refine`,
//! `or`, ...) to anything convertible into a [`Schema`].

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::context::{Outcome, ParseContext, ParseOptions};
use super::error::{Issue, IssueKind, ValidationError};
use super::path::PathSegment;
use super::result::SafeParse;
use crate::combinators;
use crate::schema::Schema;
use crate::typed::TypedSchema;
use crate::validators::ArraySchema;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The core trait that all schemas implement.
///
/// `input` is `None` when the value is absent (a missing object key); most
/// schemas report a `MissingRequired` issue for that, wrappers such as
/// `optional` accept it.
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use serde_json::json;
///
/// let username = string().min(3).max(10);
/// assert!(username.safe_parse(&json!("John")).is_success());
///
/// let err = username.parse(&json!("Jo")).unwrap_err();
/// assert_eq!(err.issues().len(), 1);
/// ```
pub trait Validate {
    /// Validates one node, reporting issues into `ctx`.
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome;

    /// Returns the name of this schema, used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Validates `input` with explicit options; never fails.
    fn safe_parse_with(&self, input: &Value, options: &ParseOptions) -> SafeParse {
        tracing::trace!(schema = self.name(), "parsing input");
        let mut ctx = ParseContext::new(options);
        let outcome = self.validate(Some(input), &mut ctx);

        match outcome {
            Ok(value) if ctx.is_clean() => SafeParse::Success(value.unwrap_or(Value::Null)),
            _ => {
                if ctx.is_clean() {
                    // A rejection must always carry at least one issue.
                    ctx.report(Issue::new(IssueKind::TypeMismatch, "Invalid input"));
                }
                let issues = ctx.into_issues();
                tracing::debug!(
                    schema = self.name(),
                    issues = issues.len(),
                    "input rejected"
                );
                SafeParse::Failure(issues)
            }
        }
    }

    /// Validates `input`; never fails.
    fn safe_parse(&self, input: &Value) -> SafeParse {
        self.safe_parse_with(input, &ParseOptions::default())
    }

    /// Validates `input` with explicit options, returning the parsed value or
    /// an error carrying every issue.
    fn parse_with(&self, input: &Value, options: &ParseOptions) -> Result<Value, ValidationError> {
        self.safe_parse_with(input, options).into_result()
    }

    /// Validates `input`, returning the parsed value or an error carrying
    /// every issue.
    fn parse(&self, input: &Value) -> Result<Value, ValidationError> {
        self.parse_with(input, &ParseOptions::default())
    }
}

// ============================================================================
// SCHEMA EXTENSION TRAIT
// ============================================================================

/// Wrapping combinators available on every schema builder.
///
/// Automatically implemented for all types convertible into [`Schema`].
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use serde_json::json;
///
/// let gmail = string()
///     .email()
///     .refine(|v| v.as_str().is_some_and(|s| s.ends_with("@gmail.com")), "Email must end with @gmail.com");
///
/// assert!(gmail.safe_parse(&json!("john@gmail.com")).is_success());
/// assert!(gmail.safe_parse(&json!("john@hotmail.com")).is_failure());
/// ```
pub trait SchemaExt: Into<Schema> + Sized {
    /// Accepts an absent value.
    fn optional(self) -> Schema {
        combinators::optional(self)
    }

    /// Accepts `null`.
    fn nullable(self) -> Schema {
        combinators::nullable(self)
    }

    /// Accepts an absent value or `null`.
    fn nullish(self) -> Schema {
        combinators::nullish(self)
    }

    /// Substitutes `value` when the input is absent.
    fn with_default(self, value: impl Into<Value>) -> Schema {
        combinators::with_default(self, value)
    }

    /// Adds a predicate that runs only after this schema accepted the value.
    fn refine<F>(self, predicate: F, message: impl Into<Cow<'static, str>>) -> Schema
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        combinators::refine(self, predicate, message)
    }

    /// Like [`refine`](SchemaExt::refine), reporting the issue at `path`
    /// relative to this value.
    fn refine_at<F, P>(
        self,
        predicate: F,
        message: impl Into<Cow<'static, str>>,
        path: P,
    ) -> Schema
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
        P: IntoIterator,
        P::Item: Into<PathSegment>,
    {
        combinators::refine_at(self, predicate, message, path.into_iter().collect())
    }

    /// Maps the parsed output through `mapping`.
    fn transform<F>(self, mapping: F) -> Schema
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        combinators::transform(self, mapping)
    }

    /// Accepts values matching this schema or `other`; chaining `or`
    /// extends the same union.
    fn or(self, other: impl Into<Schema>) -> Schema {
        combinators::or(self, other)
    }

    /// An array whose elements match this schema.
    fn array(self) -> ArraySchema {
        ArraySchema::new(self)
    }

    /// Binds this schema to a hand-declared output type.
    fn typed<T: DeserializeOwned>(self) -> TypedSchema<T> {
        TypedSchema::new(self)
    }
}

impl<T: Into<Schema>> SchemaExt for T {}

// ============================================================================
// TESTS
// ============================================================================
