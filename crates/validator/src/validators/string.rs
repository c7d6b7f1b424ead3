//! String schema
//!
//! Length is measured in Unicode scalar values (chars), not bytes.

use std::borrow::Cow;

use regex::Regex;
use serde_json::Value;

use super::content::Format;
use super::{Constraint, mismatch, require, set_last_message};
use crate::foundation::{Issue, Outcome, ParseContext, SchemaError, Validate};

/// A declarative string constraint.
#[derive(Debug, Clone)]
pub enum StringCheck {
    /// At least this many chars.
    Min(usize),
    /// At most this many chars.
    Max(usize),
    /// Exactly this many chars.
    Length(usize),
    /// A named format.
    Format(Format),
    /// A caller-supplied pattern.
    Regex(Regex),
    /// Starts with the prefix.
    StartsWith(String),
    /// Ends with the suffix.
    EndsWith(String),
    /// Contains the needle.
    Includes(String),
}

impl StringCheck {
    fn evaluate(&self, input: &str) -> Option<Issue> {
        match self {
            Self::Min(min) => (input.chars().count() < *min).then(|| {
                Issue::too_small(
                    format!("String must contain at least {min} character(s)"),
                    min,
                )
            }),
            Self::Max(max) => (input.chars().count() > *max).then(|| {
                Issue::too_big(format!("String must contain at most {max} character(s)"), max)
            }),
            Self::Length(length) => {
                let count = input.chars().count();
                let message = format!("String must contain exactly {length} character(s)");
                if count < *length {
                    Some(Issue::too_small(message, length))
                } else if count > *length {
                    Some(Issue::too_big(message, length))
                } else {
                    None
                }
            }
            Self::Format(format) => (!format.matches(input))
                .then(|| Issue::invalid_format(format.name(), format.message())),
            Self::Regex(pattern) => (!pattern.is_match(input)).then(|| {
                Issue::invalid_format("regex", "Invalid")
                    .with_param("pattern", pattern.as_str().to_owned())
            }),
            Self::StartsWith(prefix) => (!input.starts_with(prefix.as_str())).then(|| {
                Issue::invalid_format(
                    "starts_with",
                    format!("Invalid input: must start with \"{prefix}\""),
                )
            }),
            Self::EndsWith(suffix) => (!input.ends_with(suffix.as_str())).then(|| {
                Issue::invalid_format(
                    "ends_with",
                    format!("Invalid input: must end with \"{suffix}\""),
                )
            }),
            Self::Includes(needle) => (!input.contains(needle.as_str())).then(|| {
                Issue::invalid_format(
                    "includes",
                    format!("Invalid input: must include \"{needle}\""),
                )
            }),
        }
    }
}

/// Schema accepting strings.
///
/// All constraints are evaluated and every violation is reported.
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use serde_json::json;
///
/// let username = string().min(3).max(10);
///
/// assert!(username.safe_parse(&json!("John")).is_success());
///
/// let issues = username.safe_parse(&json!("Jo")).issues().cloned().unwrap();
/// assert_eq!(issues.as_slice()[0].message, "String must contain at least 3 character(s)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    checks: Vec<Constraint<StringCheck>>,
    trim: bool,
    coerce: bool,
    type_message: Option<Cow<'static, str>>,
}

impl StringSchema {
    /// A string schema without constraints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn check(mut self, check: StringCheck) -> Self {
        self.checks.push(Constraint::new(check));
        self
    }

    /// At least `min` characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(self, min: usize) -> Self {
        self.check(StringCheck::Min(min))
    }

    /// At most `max` characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(self, max: usize) -> Self {
        self.check(StringCheck::Max(max))
    }

    /// Exactly `length` characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn length(self, length: usize) -> Self {
        self.check(StringCheck::Length(length))
    }

    /// At least one character.
    #[must_use = "builder methods must be chained or built"]
    pub fn nonempty(self) -> Self {
        self.min(1)
    }

    /// A plausible email address.
    #[must_use = "builder methods must be chained or built"]
    pub fn email(self) -> Self {
        self.check(StringCheck::Format(Format::Email))
    }

    /// An absolute URL with a scheme.
    #[must_use = "builder methods must be chained or built"]
    pub fn url(self) -> Self {
        self.check(StringCheck::Format(Format::Url))
    }

    /// A hyphenated UUID.
    #[must_use = "builder methods must be chained or built"]
    pub fn uuid(self) -> Self {
        self.check(StringCheck::Format(Format::Uuid))
    }

    /// Matches `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidPattern`] if `pattern` does not compile.
    pub fn regex(self, pattern: &str) -> Result<Self, SchemaError> {
        let compiled = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        Ok(self.pattern(compiled))
    }

    /// Matches an already compiled pattern.
    #[must_use = "builder methods must be chained or built"]
    pub fn pattern(self, pattern: Regex) -> Self {
        self.check(StringCheck::Regex(pattern))
    }

    /// Starts with `prefix`.
    #[must_use = "builder methods must be chained or built"]
    pub fn starts_with(self, prefix: impl Into<String>) -> Self {
        self.check(StringCheck::StartsWith(prefix.into()))
    }

    /// Ends with `suffix`.
    #[must_use = "builder methods must be chained or built"]
    pub fn ends_with(self, suffix: impl Into<String>) -> Self {
        self.check(StringCheck::EndsWith(suffix.into()))
    }

    /// Contains `needle`.
    #[must_use = "builder methods must be chained or built"]
    pub fn includes(self, needle: impl Into<String>) -> Self {
        self.check(StringCheck::Includes(needle.into()))
    }

    /// Strips surrounding whitespace before any constraint runs; the output
    /// is the trimmed string.
    #[must_use = "builder methods must be chained or built"]
    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Also accepts numbers and booleans, converted to their string form.
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
    pub fn checks(&self) -> &[Constraint<StringCheck>] {
        &self.checks
    }

    fn coerced<'v>(&self, value: &'v Value) -> Option<Cow<'v, str>> {
        match value {
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Number(n) if self.coerce => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) if self.coerce => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }
}

impl Validate for StringSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        let value = require(input, "string", self.type_message.as_ref(), ctx)?;
        let Some(text) = self.coerced(value) else {
            return Err(mismatch("string", value, self.type_message.as_ref(), ctx));
        };
        let text = if self.trim { text.trim() } else { &*text };

        let checkpoint = ctx.issue_count();
        for constraint in &self.checks {
            if let Some(issue) = constraint.check.evaluate(text) {
                ctx.report(issue.with_message_override(constraint.message.as_ref()));
            }
        }
        ctx.settle(checkpoint, Value::String(text.to_owned()))
    }

    fn name(&self) -> &str {
        "string"
    }
}

/// Creates a string schema.
#[must_use]
pub fn string() -> StringSchema {
    StringSchema::new()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::IssueKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn messages(schema: &StringSchema, input: Value) -> Vec<String> {
        schema
            .safe_parse(&input)
            .issues()
            .map(|issues| issues.iter().map(|i| i.message.to_string()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_type_mismatch() {
        assert_eq!(
            messages(&string(), json!(42)),
            vec!["Expected string, received number"]
        );
    }

    #[test]
    fn test_missing_is_required() {
        let options = crate::foundation::ParseOptions::default();
        let mut ctx = ParseContext::new(&options);
        assert!(string().validate(None, &mut ctx).is_err());
        let issues = ctx.into_issues();
        assert_eq!(issues.as_slice()[0].kind, IssueKind::MissingRequired);
        assert_eq!(issues.as_slice()[0].message, "Required");
    }

    #[test]
    fn test_constraints_aggregate() {
        let schema = string().min(5).email();
        assert_eq!(
            messages(&schema, json!("ab")),
            vec!["String must contain at least 5 character(s)", "Invalid email"]
        );
    }

    #[rstest]
    #[case(string().min(3), "héé", true)]
    #[case(string().max(2), "héé", false)]
    #[case(string().length(3), "abc", true)]
    #[case(string().length(3), "ab", false)]
    #[case(string().nonempty(), "", false)]
    #[case(string().starts_with("https://"), "https://x", true)]
    #[case(string().ends_with(".com"), "x.org", false)]
    #[case(string().includes("@"), "a@b", true)]
    #[case(string().uuid(), "123e4567-e89b-12d3-a456-426614174000", true)]
    #[case(string().url(), "not a url", false)]
    fn test_single_constraints(
        #[case] schema: StringSchema,
        #[case] input: &str,
        #[case] ok: bool,
    ) {
        assert_eq!(schema.safe_parse(&json!(input)).is_success(), ok);
    }

    #[test]
    fn test_with_message_targets_last_constraint() {
        let schema = string()
            .min(3)
            .with_message("Username must be at least 3 characters")
            .max(10);
        assert_eq!(
            messages(&schema, json!("Jo")),
            vec!["Username must be at least 3 characters"]
        );
        assert_eq!(
            messages(&schema, json!("Johnathan Doe")),
            vec!["String must contain at most 10 character(s)"]
        );
    }

    #[test]
    fn test_with_message_without_constraints_targets_type() {
        let schema = string().with_message("Name must be text");
        assert_eq!(messages(&schema, json!(1)), vec!["Name must be text"]);
    }

    #[test]
    fn test_regex() {
        let schema = string().regex(r"^[a-z]+$").unwrap();
        assert!(schema.safe_parse(&json!("abc")).is_success());
        let issues = schema.safe_parse(&json!("ABC")).issues().cloned().unwrap();
        assert_eq!(issues.as_slice()[0].kind, IssueKind::PatternMismatch);
        assert_eq!(issues.as_slice()[0].param("pattern"), Some("^[a-z]+$"));
    }

    #[test]
    fn test_invalid_regex_fails_construction() {
        let err = string().regex("(unclosed").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPattern { .. }));
    }

    #[test]
    fn test_trim_normalizes_output() {
        let schema = string().trim().min(2);
        assert_eq!(schema.parse(&json!("  hi  ")).unwrap(), json!("hi"));
        assert!(schema.safe_parse(&json!("  h  ")).is_failure());
    }

    #[test]
    fn test_coerce() {
        let schema = string().coerce();
        assert_eq!(schema.parse(&json!(42)).unwrap(), json!("42"));
        assert_eq!(schema.parse(&json!(true)).unwrap(), json!("true"));
        assert!(schema.safe_parse(&json!(null)).is_failure());
        assert!(string().safe_parse(&json!(42)).is_failure());
    }
}
