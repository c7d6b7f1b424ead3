//! Date schema
//!
//! Dates travel as strings: RFC 3339 timestamps (`2024-05-01T12:00:00+02:00`)
//! or plain calendar dates (`2024-05-01`, read as midnight UTC). The parsed
//! output is always an RFC 3339 timestamp in UTC, so parsing it again yields
//! the same string.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::Value;

use super::{Constraint, mismatch, require, set_last_message};
use crate::foundation::{Issue, Outcome, ParseContext, Validate};

/// A declarative date bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCheck {
    /// On or after.
    Min(DateTime<Utc>),
    /// On or before.
    Max(DateTime<Utc>),
}

impl DateCheck {
    fn evaluate(self, input: DateTime<Utc>) -> Option<Issue> {
        match self {
            Self::Min(min) => (input < min).then(|| {
                let min = format_date(min);
                Issue::too_small(
                    format!("Date must be greater than or equal to {min}"),
                    min,
                )
            }),
            Self::Max(max) => (input > max).then(|| {
                let max = format_date(max);
                Issue::too_big(format!("Date must be smaller than or equal to {max}"), max)
            }),
        }
    }
}

/// Reads an RFC 3339 timestamp or a `YYYY-MM-DD` date.
pub(crate) fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn format_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Schema accepting date strings.
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use chrono::{TimeZone, Utc};
/// use serde_json::json;
///
/// let after_2000 = date().min(Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap());
///
/// assert_eq!(
///     after_2000.parse(&json!("2024-05-01")).unwrap(),
///     json!("2024-05-01T00:00:00Z")
/// );
/// assert!(after_2000.safe_parse(&json!("1999-12-31")).is_failure());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DateSchema {
    checks: Vec<Constraint<DateCheck>>,
    type_message: Option<Cow<'static, str>>,
}

impl DateSchema {
    /// A date schema without bounds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// On or after `min`.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(mut self, min: DateTime<Utc>) -> Self {
        self.checks.push(Constraint::new(DateCheck::Min(min)));
        self
    }

    /// On or before `max`.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(mut self, max: DateTime<Utc>) -> Self {
        self.checks.push(Constraint::new(DateCheck::Max(max)));
        self
    }

    /// Replaces the message of the most recently added bound.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        set_last_message(&mut self.checks, &mut self.type_message, message.into());
        self
    }
}

impl Validate for DateSchema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        let value = require(input, "date", self.type_message.as_ref(), ctx)?;
        let Value::String(text) = value else {
            return Err(mismatch("date", value, self.type_message.as_ref(), ctx));
        };
        let Some(parsed) = parse_date(text) else {
            return Err(ctx.report(
                Issue::invalid_format("date", "Invalid date")
                    .with_message_override(self.type_message.as_ref()),
            ));
        };

        let checkpoint = ctx.issue_count();
        for constraint in &self.checks {
            if let Some(issue) = constraint.check.evaluate(parsed) {
                ctx.report(issue.with_message_override(constraint.message.as_ref()));
            }
        }
        ctx.settle(checkpoint, Value::String(format_date(parsed)))
    }

    fn name(&self) -> &str {
        "date"
    }
}

/// Creates a date schema.
#[must_use]
pub fn date() -> DateSchema {
    DateSchema::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::IssueKind;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_normalizes_offsets_to_utc() {
        assert_eq!(
            date().parse(&json!("2024-05-01T12:00:00+02:00")).unwrap(),
            json!("2024-05-01T10:00:00Z")
        );
    }

    #[test]
    fn test_output_reparses_identically() {
        let once = date().parse(&json!("2024-05-01T10:00:00.250Z")).unwrap();
        assert_eq!(date().parse(&once).unwrap(), once);
    }

    #[test]
    fn test_invalid_date() {
        let issues = date().safe_parse(&json!("2024-13-45")).issues().cloned().unwrap();
        assert_eq!(issues.as_slice()[0].kind, IssueKind::PatternMismatch);
        assert_eq!(issues.as_slice()[0].message, "Invalid date");
    }

    #[test]
    fn test_non_string_is_type_mismatch() {
        let issues = date().safe_parse(&json!(20240501)).issues().cloned().unwrap();
        assert_eq!(issues.as_slice()[0].message, "Expected date, received number");
    }

    #[test]
    fn test_bounds() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        let schema = date().min(start).max(end).with_message("Must be in 2024");

        assert!(schema.safe_parse(&json!("2024-06-01")).is_success());
        assert!(schema.safe_parse(&json!("2023-06-01")).is_failure());

        let issues = schema.safe_parse(&json!("2025-06-01")).issues().cloned().unwrap();
        assert_eq!(issues.as_slice()[0].message, "Must be in 2024");
    }
}
