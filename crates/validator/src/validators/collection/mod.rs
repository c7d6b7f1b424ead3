//! Collection schemas
//!
//! - [`ArraySchema`]: homogeneous sequences
//! - [`TupleSchema`]: fixed positions plus an optional rest element
//! - [`RecordSchema`]: string keys mapped to values of one schema
//! - [`MapSchema`]: `[key, value]` pairs with schemas for both sides
//! - [`SetSchema`]: unique members
//!
//! Checks on the collection itself (type, size) are reported before the
//! issues of its members.

use std::borrow::Cow;

use super::Constraint;
use crate::foundation::{Issue, ParseContext};

pub mod array;
pub mod map;
pub mod record;
pub mod set;
pub mod tuple;

pub use array::{ArraySchema, array};
pub use map::{MapSchema, map};
pub use record::{RecordSchema, record};
pub use set::{SetSchema, set};
pub use tuple::{TupleSchema, tuple};

/// A declarative size constraint on a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthCheck {
    /// At least this many members.
    Min(usize),
    /// At most this many members.
    Max(usize),
    /// Exactly this many members.
    Exact(usize),
}

impl LengthCheck {
    fn evaluate(self, noun: &str, len: usize) -> Option<Issue> {
        match self {
            Self::Min(min) => (len < min).then(|| {
                Issue::too_small(format!("{noun} must contain at least {min} element(s)"), min)
            }),
            Self::Max(max) => (len > max).then(|| {
                Issue::too_big(format!("{noun} must contain at most {max} element(s)"), max)
            }),
            Self::Exact(exact) => {
                let message = format!("{noun} must contain exactly {exact} element(s)");
                if len < exact {
                    Some(Issue::too_small(message, exact))
                } else if len > exact {
                    Some(Issue::too_big(message, exact))
                } else {
                    None
                }
            }
        }
    }
}

/// Reports every violated size constraint; each one is its own issue.
pub(crate) fn check_length(
    checks: &[Constraint<LengthCheck>],
    noun: &str,
    len: usize,
    ctx: &mut ParseContext<'_>,
) {
    for constraint in checks {
        if let Some(issue) = constraint.check.evaluate(noun, len) {
            ctx.report(issue.with_message_override(constraint.message.as_ref()));
        }
    }
}

/// Shared builder plumbing for sized collections.
#[derive(Debug, Clone, Default)]
pub(crate) struct SizeChecks {
    pub(crate) checks: Vec<Constraint<LengthCheck>>,
    pub(crate) type_message: Option<Cow<'static, str>>,
}

impl SizeChecks {
    pub(crate) fn push(&mut self, check: LengthCheck) {
        self.checks.push(Constraint::new(check));
    }

    pub(crate) fn set_message(&mut self, message: Cow<'static, str>) {
        super::set_last_message(&mut self.checks, &mut self.type_message, message);
    }
}
