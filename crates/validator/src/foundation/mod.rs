//! Core validation types and traits
//!
//! This module contains the fundamental building blocks of the engine:
//!
//! - **Traits**: `Validate`, `SchemaExt`
//! - **Issues**: `Issue`, `IssueKind`, `Issues`, `Path`
//! - **Errors**: `ValidationError`, `SchemaError`
//! - **Per-call state**: `ParseContext`, `ParseOptions`, `SafeParse`
//!
//! # Architecture
//!
//! ## 1. Schemas are values
//!
//! A schema is built once and reused for every call. Builders return new
//! values; nothing is mutated after construction, so a schema can be shared
//! across threads freely.
//!
//! ## 2. Issues are data
//!
//! Validation never panics on bad input. Every violation becomes an
//! [`Issue`] with a path, a kind and a message, and all of them are
//! collected:
//!
//! ```
//! use sieve_validator::prelude::*;
//! use serde_json::json;
//!
//! let user = object()
//!     .field("username", string().min(3))
//!     .field("age", number().gt(0.0));
//!
//! let issues = user.safe_parse(&json!({ "username": "Jo", "age": -1 })).issues().cloned().unwrap();
//! assert_eq!(issues.len(), 2);
//! ```
//!
//! ## 3. Two entry points
//!
//! [`safe_parse`] returns a tagged [`SafeParse`] and is the recommended entry
//! point wherever invalid input is expected. [`parse`] returns
//! `Result<Value, ValidationError>` for call sites that treat invalid input as
//! a defect.

pub mod context;
pub mod error;
pub mod path;
pub mod result;
pub mod traits;

pub use context::{Outcome, ParseContext, ParseOptions, Rejected};
pub use error::{
    FlattenedIssues, Issue, IssueKind, IssueParams, Issues, SchemaError, ValidationError,
};
pub use path::{Path, PathSegment};
pub use result::SafeParse;
pub use traits::{SchemaExt, Validate};

use serde_json::Value;

// ============================================================================
// PRELUDE
// ============================================================================

/// Common imports for working with the engine core.
pub mod prelude {
    pub use super::{
        Issue, IssueKind, Issues, ParseOptions, Path, PathSegment, SafeParse, SchemaError,
        SchemaExt, Validate, ValidationError,
    };
}

// ============================================================================
// UTILITIES
// ============================================================================

/// Validates `input` against `schema`, returning the parsed value or every
/// issue found.
///
/// # Examples
///
/// ```
/// use sieve_validator::foundation::parse;
/// use sieve_validator::validators::string;
/// use serde_json::json;
///
/// assert_eq!(parse(&string(), &json!("ok")).unwrap(), json!("ok"));
/// assert!(parse(&string(), &json!(1)).is_err());
/// ```
pub fn parse<V>(schema: &V, input: &Value) -> Result<Value, ValidationError>
where
    V: Validate + ?Sized,
{
    schema.parse(input)
}

/// Validates `input` against `schema`; never fails.
///
/// # Examples
///
/// ```
/// use sieve_validator::foundation::safe_parse;
/// use sieve_validator::validators::number;
/// use serde_json::json;
///
/// assert!(safe_parse(&number(), &json!(1)).is_success());
/// assert!(safe_parse(&number(), &json!("1")).is_failure());
/// ```
#[must_use = "validation result must be checked"]
pub fn safe_parse<V>(schema: &V, input: &Value) -> SafeParse
where
    V: Validate + ?Sized,
{
    schema.safe_parse(input)
}

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// A parse result carrying the full issue collection on failure.
pub type ParseResult<T> = Result<T, ValidationError>;

// ============================================================================
// TESTS
// ============================================================================
