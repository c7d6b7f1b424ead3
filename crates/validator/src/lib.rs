//! # sieve-validator
//!
//! Declarative schemas for JSON-like data: declare the shape once, then parse
//! untrusted input into either a cleaned value or a complete list of issues,
//! each with a path, a kind and a message.
//!
//! ## Quick Start
//!
//! ```
//! use sieve_validator::prelude::*;
//! use serde_json::json;
//!
//! let signup = object()
//!     .field("username", string().trim().min(3).max(20))
//!     .field("email", string().email())
//!     .field("age", number().int().gte(18.0).optional())
//!     .strict();
//!
//! let parsed = signup.parse(&json!({ "username": "  alice ", "email": "alice@example.com" }))?;
//! assert_eq!(parsed, json!({ "username": "alice", "email": "alice@example.com" }));
//!
//! let issues = signup
//!     .safe_parse(&json!({ "username": "al", "email": "nope", "admin": true }))
//!     .issues()
//!     .cloned()
//!     .unwrap();
//! assert_eq!(issues.len(), 3);
//! # Ok::<(), sieve_validator::foundation::ValidationError>(())
//! ```
//!
//! ## Building Blocks
//!
//! - **Primitives**: [`string`](validators::string), [`number`](validators::number),
//!   [`boolean`](validators::boolean), [`date`](validators::date),
//!   [`literal`](validators::literal), [`enumeration`](validators::enumeration)
//! - **Structures**: [`object`](validators::object), [`array`](validators::array),
//!   [`tuple`](validators::tuple), [`record`](validators::record),
//!   [`map`](validators::map), [`set`](validators::set)
//! - **Combinators**: [`optional`](combinators::optional), [`nullable`](combinators::nullable),
//!   [`union`](combinators::union), [`discriminated_union`](combinators::discriminated_union),
//!   [`refine`](combinators::refine), [`transform`](combinators::transform)
//! - **Typed output**: [`SchemaExt::typed`](foundation::SchemaExt::typed) deserializes
//!   the parsed value into your own type
//!
//! Implement [`Validate`](foundation::Validate) directly for anything the
//! builders cannot express.

// Issues are returned by value on every rejected parse.
#![allow(clippy::result_large_err)]

#[macro_use]
mod macros;

pub mod combinators;
pub mod foundation;
pub mod format;
pub mod json;
pub mod prelude;
pub mod schema;
pub mod typed;
pub mod validators;
