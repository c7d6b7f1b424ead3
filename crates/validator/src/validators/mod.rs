//! Built-in schema builders
//!
//! # Categories
//!
//! - **Primitives**: [`string`], [`number`], [`boolean`], [`date`],
//!   [`literal`], [`enumeration`], [`null`], [`any`], [`unknown`], [`never`]
//! - **Objects**: [`object`] with pick/omit/partial/extend/merge modifiers
//! - **Collections**: [`array`], [`tuple`], [`record`], [`map`], [`set`]
//!
//! Every builder method returns a new value, so partially built schemas can be
//! reused as templates:
//!
//! ```
//! use sieve_validator::prelude::*;
//! use serde_json::json;
//!
//! let name = string().trim().min(1);
//! let short_name = name.clone().max(8);
//!
//! assert!(name.safe_parse(&json!("  Alexandria  ")).is_success());
//! assert!(short_name.safe_parse(&json!("Alexandria")).is_failure());
//! ```

use std::borrow::Cow;

use serde_json::Value;

use crate::foundation::{Issue, ParseContext, Rejected};
use crate::json::received_type;

pub mod boolean;
pub mod collection;
pub mod content;
pub mod date;
pub mod literal;
pub mod number;
pub mod object;
pub mod string;

pub use boolean::{BooleanSchema, boolean};
pub use collection::{
    ArraySchema, LengthCheck, MapSchema, RecordSchema, SetSchema, TupleSchema, array, map,
    record, set, tuple,
};
pub use date::{DateCheck, DateSchema, date};
pub use literal::{
    AnySchema, EnumSchema, LiteralSchema, NeverSchema, NullSchema, any, enumeration, literal,
    never, null, unknown,
};
pub use number::{NumberCheck, NumberSchema, number};
pub use object::{ObjectSchema, UnknownKeys, object};
pub use string::{StringCheck, StringSchema, string};

// ============================================================================
// CONSTRAINT
// ============================================================================

/// A declarative check plus an optional caller-supplied message.
#[derive(Debug, Clone)]
pub struct Constraint<C> {
    /// What to check.
    pub check: C,
    /// Replaces the default message when set.
    pub message: Option<Cow<'static, str>>,
}

impl<C> Constraint<C> {
    pub(crate) fn new(check: C) -> Self {
        Self {
            check,
            message: None,
        }
    }
}

/// Sets the message of the last constraint, or of the type check when there
/// is no constraint yet.
pub(crate) fn set_last_message<C>(
    checks: &mut [Constraint<C>],
    type_message: &mut Option<Cow<'static, str>>,
    message: Cow<'static, str>,
) {
    match checks.last_mut() {
        Some(last) => last.message = Some(message),
        None => *type_message = Some(message),
    }
}

// ============================================================================
// SHARED HELPERS
// ============================================================================

/// Rejects an absent value with a `MissingRequired` issue.
pub(crate) fn require<'v>(
    input: Option<&'v Value>,
    expected: &'static str,
    message: Option<&Cow<'static, str>>,
    ctx: &mut ParseContext<'_>,
) -> Result<&'v Value, Rejected> {
    match input {
        Some(value) => Ok(value),
        None => {
            Err(ctx.report(Issue::missing_required(expected).with_message_override(message)))
        }
    }
}

/// Reports a `TypeMismatch` issue for `value`.
pub(crate) fn mismatch(
    expected: &'static str,
    value: &Value,
    message: Option<&Cow<'static, str>>,
    ctx: &mut ParseContext<'_>,
) -> Rejected {
    ctx.report(Issue::type_mismatch(expected, received_type(value)).with_message_override(message))
}
