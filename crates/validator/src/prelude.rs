//! Prelude module for convenient imports.
//!
//! Provides a single `use sieve_validator::prelude::*;` import that brings
//! in the traits, schema builders and combinators needed to declare and run
//! schemas.
//!
//! # Examples
//!
//! ```
//! use sieve_validator::prelude::*;
//! use serde_json::json;
//!
//! let user = object()
//!     .field("username", string().min(3).max(20))
//!     .field("age", number().int().nonnegative().optional())
//!     .field("tags", array(string()).max(5));
//!
//! assert!(user.safe_parse(&json!({ "username": "alice", "tags": [] })).is_success());
//! ```

// ============================================================================
// FOUNDATION: Core traits, issues, results
// ============================================================================

pub use crate::foundation::{
    Issue, IssueKind, Issues, ParseOptions, Path, PathSegment, SafeParse, SchemaError, SchemaExt,
    Validate, ValidationError,
};
pub use crate::schema::{Schema, SchemaKind};
pub use crate::typed::TypedSchema;

// ============================================================================
// VALIDATORS: All built-in schema builders
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;

// ============================================================================
// COMBINATORS: Composition functions and types
// ============================================================================

pub use crate::combinators::{
    DiscriminatedUnionSchema, NullableSchema, OptionalSchema, RefinedSchema, TransformSchema,
    UnionSchema, WithDefaultSchema, discriminated_union, nullable, nullish, optional, or, refine,
    refine_at, transform, union, with_default,
};

// ============================================================================
// FORMATTING
// ============================================================================

pub use crate::format::{FormatOptions, format_issues};
