//! Schema combinators
//!
//! Wrappers that change how another schema treats its input:
//!
//! - [`optional`], [`nullable`], [`nullish`], [`with_default`]: absence and `null`
//! - [`union`], [`or`]: first matching member wins
//! - [`discriminated_union`]: member chosen by a literal field
//! - [`refine`], [`refine_at`]: predicate over the parsed value
//! - [`transform`]: mapping over the parsed value
//!
//! Every function returns a new schema; the wrapped schema is shared, not
//! copied.

pub mod discriminated;
pub mod optional;
pub mod refine;
pub mod union;

pub use discriminated::{DiscriminatedUnionSchema, discriminated_union};
pub use optional::{
    NullableSchema, OptionalSchema, WithDefaultSchema, nullable, nullish, optional, with_default,
};
pub use refine::{RefinedSchema, TransformSchema, refine, refine_at, transform};
pub use union::{UnionSchema, or, union};
