//! Number schema

use std::borrow::Cow;

use serde_json::{Number, Value};

use super::{Constraint, mismatch, require, set_last_message};
use crate::foundation::{Issue, IssueKind, Outcome, ParseContext, Validate};

/// A declarative numeric constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberCheck {
    /// Strictly greater than.
    Gt(f64),
    /// Greater than or equal to.
    Gte(f64),
    /// Strictly less than.
    Lt(f64),
    /// Less than or equal to.
    Lte(f64),
    /// No fractional part.
    Int,
    /// An integer multiple of the step.
    MultipleOf(f64),
}

impl NumberCheck {
    fn evaluate(self, input: f64) -> Option<Issue> {
        match self {
            Self::Gt(min) => (input <= min).then(|| {
                Issue::too_small(format!("Number must be greater than {min}"), min)
                    .with_param("inclusive", "false")
            }),
            Self::Gte(min) => (input < min).then(|| {
                Issue::too_small(
                    format!("Number must be greater than or equal to {min}"),
                    min,
                )
                .with_param("inclusive", "true")
            }),
            Self::Lt(max) => (input >= max).then(|| {
                Issue::too_big(format!("Number must be less than {max}"), max)
                    .with_param("inclusive", "false")
            }),
            Self::Lte(max) => (input > max).then(|| {
                Issue::too_big(format!("Number must be less than or equal to {max}"), max)
                    .with_param("inclusive", "true")
            }),
            Self::Int => (input.fract() != 0.0).then(|| Issue::type_mismatch("integer", "float")),
            Self::MultipleOf(step) => (!is_multiple_of(input, step)).then(|| {
                Issue::new(
                    IssueKind::OutOfRange,
                    format!("Number must be a multiple of {step}"),
                )
                .with_param("multiple_of", step.to_string())
            }),
        }
    }
}

/// Float-tolerant remainder check: `0.3` is a multiple of `0.1`.
fn is_multiple_of(input: f64, step: f64) -> bool {
    if step == 0.0 {
        return false;
    }
    let ratio = input / step;
    (ratio - ratio.round()).abs() <= 1e-9 * ratio.abs().max(1.0)
}

/// Schema accepting finite numbers.
///
/// The output keeps the input's representation, so integers stay integers.
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use serde_json::json;
///
/// let age = number().int().gte(18.0).lte(100.0);
///
/// assert!(age.safe_parse(&json!(30)).is_success());
/// assert!(age.safe_parse(&json!(17)).is_failure());
/// assert!(age.safe_parse(&json!(30.5)).is_failure());
/// ```
#[derive(Debug, Clone, Default)]
pub struct NumberSchema {
    checks: Vec<Constraint<NumberCheck>>,
    coerce: bool,
    type_message: Option<Cow<'static, str>>,
}

impl NumberSchema {
    /// A number schema without constraints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn check(mut self, check: NumberCheck) -> Self {
        self.checks.push(Constraint::new(check));
        self
    }

    /// Greater than `min`.
    #[must_use = "builder methods must be chained or built"]
    pub fn gt(self, min: f64) -> Self {
        self.check(NumberCheck::Gt(min))
    }

    /// Greater than or equal to `min`.
    #[must_use = "builder methods must be chained or built"]
    pub fn gte(self, min: f64) -> Self {
        self.check(NumberCheck::Gte(min))
    }

    /// Alias of [`gte`](Self::gte).
    #[must_use = "builder methods must be chained or built"]
    pub fn min(self, min: f64) -> Self {
        self.gte(min)
    }

    /// Less than `max`.
    #[must_use = "builder methods must be chained or built"]
    pub fn lt(self, max: f64) -> Self {
        self.check(NumberCheck::Lt(max))
    }

    /// Less than or equal to `max`.
    #[must_use = "builder methods must be chained or built"]
    pub fn lte(self, max: f64) -> Self {
        self.check(NumberCheck::Lte(max))
    }

    /// Alias of [`lte`](Self::lte).
    #[must_use = "builder methods must be chained or built"]
    pub fn max(self, max: f64) -> Self {
        self.lte(max)
    }

    /// No fractional part.
    #[must_use = "builder methods must be chained or built"]
    pub fn int(self) -> Self {
        self.check(NumberCheck::Int)
    }

    /// Greater than zero.
    #[must_use = "builder methods must be chained or built"]
    pub fn positive(self) -> Self {
        self.gt(0.0)
    }

    /// Zero or greater.
    #[must_use = "builder methods must be chained or built"]
    pub fn nonnegative(self) -> Self {
        self.gte(0.0)
    }

    /// Less than zero.
    #[must_use = "builder methods must be chained or built"]
    pub fn negative(self) -> Self {
        self.lt(0.0)
    }

    /// Zero or less.
    #[must_use = "builder methods must be chained or built"]
    pub fn nonpositive(self) -> Self {
        self.lte(0.0)
    }

    /// An integer multiple of `step`.
    #[must_use = "builder methods must be chained or built"]
    pub fn multiple_of(self, step: f64) -> Self {
        self.check(NumberCheck::MultipleOf(step))
    }

    /// Also accepts strings holding a number (`"42"`, `" 1.5 "`).
    #[must_use = "builder methods must be chained or built"]
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    /// Replaces the message of the most recently added constraint.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        set_last_message(&mut self.checks, &mut self.type_message, message.into());
        self
    }

    /// The declared constraints, in order.
    #[must_use]
    pub fn checks(&self) -> &[Constraint<NumberCheck>] {
        &self.checks
    }
}

/// Parses a numeric string, preferring integer representations.
fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    if let Ok(int) = text.parse::<i64>() {
        return Some(Number::from(int));
    }
    if let Ok(uint) = text.parse::<u64>() {
        return Some(Number::from(uint));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

impl Validate for NumberSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        let value = require(input, "number", self.type_message.as_ref(), ctx)?;
        let number = match value {
            Value::Number(n) => n.clone(),
            Value::String(s) if self.coerce => match parse_number(s) {
                Some(n) => n,
                None => {
                    return Err(ctx.report(
                        Issue::type_mismatch("number", "nan")
                            .with_message_override(self.type_message.as_ref()),
                    ));
                }
            },
            other => return Err(mismatch("number", other, self.type_message.as_ref(), ctx)),
        };
        let Some(float) = number.as_f64() else {
            return Err(mismatch("number", value, self.type_message.as_ref(), ctx));
        };

        let checkpoint = ctx.issue_count();
        for constraint in &self.checks {
            if let Some(issue) = constraint.check.evaluate(float) {
                ctx.report(issue.with_message_override(constraint.message.as_ref()));
            }
        }
        ctx.settle(checkpoint, Value::Number(number))
    }

    fn name(&self) -> &str {
        "number"
    }
}

/// Creates a number schema.
#[must_use]
pub fn number() -> NumberSchema {
    NumberSchema::new()
}

// ============================================================================
// TESTS
// ============================================================================
