//! Schemas bound to a Rust output type
//!
//! A [`TypedSchema<T>`] validates like its inner [`Schema`] and then
//! deserializes the parsed value into `T`. Where the declared type and the
//! schema disagree, the deserialization failure becomes an ordinary issue at
//! the offending path instead of a panic or an opaque serde error.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::foundation::{
    Issue, IssueKind, Issues, ParseOptions, Path, PathSegment, SafeParse, Validate,
    ValidationError,
};
use crate::schema::Schema;

/// A schema whose output is deserialized into `T`.
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct User {
///     username: String,
///     age: f64,
/// }
///
/// let user = object()
///     .field("username", string().trim().min(3))
///     .field("age", number().positive())
///     .typed::<User>();
///
/// let parsed = user.parse(&json!({ "username": "  john ", "age": 30 }))?;
/// assert_eq!(parsed, User { username: "john".into(), age: 30.0 });
/// # Ok::<(), sieve_validator::foundation::ValidationError>(())
/// ```
pub struct TypedSchema<T> {
    schema: Schema,
    output: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> TypedSchema<T> {
    /// Binds `schema` to `T`.
    pub fn new(schema: impl Into<Schema>) -> Self {
        Self {
            schema: schema.into(),
            output: PhantomData,
        }
    }

    /// The untyped schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validates `input` and deserializes the parsed value.
    ///
    /// # Errors
    ///
    /// Every validation issue, or a single type mismatch when the parsed
    /// value does not fit `T`.
    pub fn parse_with(&self, input: &Value, options: &ParseOptions) -> Result<T, ValidationError> {
        match self.schema.safe_parse_with(input, options) {
            SafeParse::Success(value) => deserialize(value).map_err(ValidationError::new),
            SafeParse::Failure(issues) => Err(ValidationError::new(issues)),
        }
    }

    /// Validates `input` with default options and deserializes it.
    ///
    /// # Errors
    ///
    /// See [`parse_with`](Self::parse_with).
    pub fn parse(&self, input: &Value) -> Result<T, ValidationError> {
        self.parse_with(input, &ParseOptions::default())
    }

    /// Like [`parse`](Self::parse), returning the bare issues on failure.
    ///
    /// # Errors
    ///
    /// See [`parse_with`](Self::parse_with).
    pub fn safe_parse(&self, input: &Value) -> Result<T, Issues> {
        self.parse(input).map_err(ValidationError::into_issues)
    }
}

impl<T> Clone for TypedSchema<T> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            output: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TypedSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSchema")
            .field("output", &type_name::<T>())
            .field("schema", &self.schema)
            .finish()
    }
}

impl<T> From<TypedSchema<T>> for Schema {
    fn from(typed: TypedSchema<T>) -> Self {
        typed.schema
    }
}

fn deserialize<T: DeserializeOwned>(value: Value) -> Result<T, Issues> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| {
        let path = err
            .path()
            .iter()
            .filter_map(|segment| match segment {
                serde_path_to_error::Segment::Seq { index } => Some(PathSegment::Index(*index)),
                serde_path_to_error::Segment::Map { key } => Some(PathSegment::Key(key.clone())),
                serde_path_to_error::Segment::Enum { variant } => {
                    Some(PathSegment::Key(variant.clone()))
                }
                _ => None,
            })
            .collect::<Path>();
        let expected = type_name::<T>();
        tracing::debug!(%path, expected, error = %err.inner(), "parsed value does not fit output type");
        let issue = Issue::new(IssueKind::TypeMismatch, err.inner().to_string())
            .with_param("expected", expected)
            .at(path);
        std::iter::once(issue).collect()
    })
}
