//! Issues and error types
//!
//! Every rejected input is described by one or more [`Issue`]s. An issue
//! carries the path to the offending value, a machine-readable
//! [`IssueKind`], a human-readable message and a few string parameters.
//!
//! Messages and parameters use `Cow<'static, str>` so the common case of a
//! static message costs no allocation.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::path::{Path, PathSegment};
use crate::format::{FormatOptions, format_issues};

// ============================================================================
// ISSUE KIND
// ============================================================================

/// Classification of a single validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// The value has the wrong JSON type (or is not an integer, or a date).
    TypeMismatch,
    /// A required value is absent.
    MissingRequired,
    /// A length, size or numeric bound is violated.
    OutOfRange,
    /// A string does not match a format or pattern.
    PatternMismatch,
    /// A strict object received keys it does not declare.
    UnrecognizedKey,
    /// A refinement predicate rejected an otherwise valid value.
    RefinementFailed,
    /// A discriminated union could not select a member.
    DiscriminantMismatch,
    /// A literal or enum schema received a value outside its set.
    InvalidValue,
}

impl IssueKind {
    /// Stable snake_case code, suitable for i18n lookups.
    pub fn code(self) -> &'static str {
        match self {
            Self::TypeMismatch => "type_mismatch",
            Self::MissingRequired => "missing_required",
            Self::OutOfRange => "out_of_range",
            Self::PatternMismatch => "pattern_mismatch",
            Self::UnrecognizedKey => "unrecognized_key",
            Self::RefinementFailed => "refinement_failed",
            Self::DiscriminantMismatch => "discriminant_mismatch",
            Self::InvalidValue => "invalid_value",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// ISSUE
// ============================================================================

/// Ordered key/value parameters attached to an issue (typically 0-3).
pub type IssueParams = SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>;

/// A single structured validation failure.
///
/// # Examples
///
/// ```
/// use sieve_validator::foundation::{Issue, IssueKind};
///
/// let issue = Issue::new(IssueKind::OutOfRange, "String must contain at least 3 character(s)")
///     .with_param("minimum", "3");
/// assert_eq!(issue.param("minimum"), Some("3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Accessors from the root value to the offending value.
    pub path: Path,
    /// What went wrong.
    pub kind: IssueKind,
    /// Human-readable message in English.
    pub message: Cow<'static, str>,
    /// Parameters for message templating (`expected`, `received`, `minimum`, ...).
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub params: IssueParams,
}

impl Issue {
    /// Creates an issue at the root path.
    pub fn new(kind: IssueKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            path: Path::root(),
            kind,
            message: message.into(),
            params: SmallVec::new(),
        }
    }

    /// Sets the path of this issue.
    #[must_use = "builder methods must be chained or built"]
    pub fn at(mut self, path: Path) -> Self {
        self.path = path;
        self
    }

    /// Adds a parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Replaces the message when `message` is set.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message_override(mut self, message: Option<&Cow<'static, str>>) -> Self {
        if let Some(message) = message {
            self.message = message.clone();
        }
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}: {}", self.kind, self.message)
        } else {
            write!(f, "[{}] {}: {}", self.path, self.kind, self.message)
        }
    }
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl Issue {
    /// Creates a "type mismatch" issue.
    pub fn type_mismatch(
        expected: impl Into<Cow<'static, str>>,
        received: impl Into<Cow<'static, str>>,
    ) -> Self {
        let expected = expected.into();
        let received = received.into();
        Self::new(
            IssueKind::TypeMismatch,
            format!("Expected {expected}, received {received}"),
        )
        .with_param("expected", expected)
        .with_param("received", received)
    }

    /// Creates a "required" issue for an absent value.
    pub fn missing_required(expected: impl Into<Cow<'static, str>>) -> Self {
        Self::new(IssueKind::MissingRequired, "Required")
            .with_param("expected", expected)
            .with_param("received", "undefined")
    }

    /// Creates a "too small" issue.
    pub fn too_small(message: impl Into<Cow<'static, str>>, minimum: impl fmt::Display) -> Self {
        Self::new(IssueKind::OutOfRange, message).with_param("minimum", minimum.to_string())
    }

    /// Creates a "too big" issue.
    pub fn too_big(message: impl Into<Cow<'static, str>>, maximum: impl fmt::Display) -> Self {
        Self::new(IssueKind::OutOfRange, message).with_param("maximum", maximum.to_string())
    }

    /// Creates a "pattern mismatch" issue for a named format.
    pub fn invalid_format(
        validation: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(IssueKind::PatternMismatch, message).with_param("validation", validation)
    }
}

// ============================================================================
// ISSUE COLLECTION
// ============================================================================

/// An ordered collection of issues.
///
/// Order follows depth-first traversal of the schema, so the same input and
/// schema always produce the same sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Issues {
    issues: Vec<Issue>,
}

/// Issues split into root-level messages and messages per top-level field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlattenedIssues {
    /// Messages of issues reported at the root path.
    pub form_errors: Vec<String>,
    /// Messages keyed by the first path segment, in first-seen order.
    pub field_errors: IndexMap<String, Vec<String>>,
}

impl Issues {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Adds an issue.
    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Adds several issues.
    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    /// Number of issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Iterates the issues in traversal order.
    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    /// All issues as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Issue] {
        &self.issues
    }

    /// Consumes the collection.
    #[must_use]
    pub fn into_vec(self) -> Vec<Issue> {
        self.issues
    }

    /// Keeps at most `max` issues.
    pub fn truncate(&mut self, max: usize) {
        self.issues.truncate(max);
    }

    /// Issues whose path equals `path` exactly.
    pub fn at<'a>(&'a self, path: &'a Path) -> impl Iterator<Item = &'a Issue> + 'a {
        self.issues.iter().filter(move |issue| &issue.path == path)
    }

    /// First issue reported for a top-level field.
    #[must_use]
    pub fn first_for_field(&self, field: &str) -> Option<&Issue> {
        self.issues
            .iter()
            .find(|issue| issue.path.first().and_then(PathSegment::as_key) == Some(field))
    }

    /// Counts issues of the given kind.
    #[must_use]
    pub fn count_kind(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|issue| issue.kind == kind).count()
    }

    /// Splits the issues into root-level and per-field messages.
    #[must_use]
    pub fn flatten(&self) -> FlattenedIssues {
        let mut flattened = FlattenedIssues::default();
        for issue in &self.issues {
            match issue.path.first() {
                None => flattened.form_errors.push(issue.message.to_string()),
                Some(segment) => flattened
                    .field_errors
                    .entry(segment.to_string())
                    .or_default()
                    .push(issue.message.to_string()),
            }
        }
        flattened
    }
}

impl FromIterator<Issue> for Issues {
    fn from_iter<I: IntoIterator<Item = Issue>>(iter: I) -> Self {
        Self {
            issues: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

impl fmt::Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} issue(s):", self.issues.len())?;
        for (i, issue) in self.issues.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Error returned by `parse` when the input does not conform.
///
/// Carries every issue found, not only the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", format_issues(.issues, &FormatOptions::default()))]
pub struct ValidationError {
    issues: Issues,
}

impl ValidationError {
    /// Wraps a non-empty issue collection.
    #[must_use]
    pub fn new(issues: Issues) -> Self {
        Self { issues }
    }

    /// The issues that caused the failure.
    #[must_use]
    pub fn issues(&self) -> &Issues {
        &self.issues
    }

    /// Consumes the error.
    #[must_use]
    pub fn into_issues(self) -> Issues {
        self.issues
    }
}

impl From<Issues> for ValidationError {
    fn from(issues: Issues) -> Self {
        Self::new(issues)
    }
}

/// Error raised while constructing a schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A `regex` constraint received a pattern that does not compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Compiler error.
        #[source]
        source: regex::Error,
    },

    /// A discriminated union was built without members.
    #[error("discriminated union on `{discriminant}` has no members")]
    EmptyUnion {
        /// Discriminant field name.
        discriminant: String,
    },

    /// A discriminated union member is not an object schema.
    #[error("member {index} of discriminated union is not an object schema")]
    NonObjectMember {
        /// Member position.
        index: usize,
    },

    /// A member does not declare the discriminant as a literal or enum.
    #[error("member {index} of discriminated union has no literal `{discriminant}` field")]
    MissingDiscriminant {
        /// Member position.
        index: usize,
        /// Discriminant field name.
        discriminant: String,
    },

    /// Two members share a discriminant value.
    #[error("discriminant value {value} is used by members {first} and {second}")]
    DuplicateDiscriminant {
        /// The duplicated value, JSON-encoded.
        value: String,
        /// First member using it.
        first: usize,
        /// Second member using it.
        second: usize,
    },

    /// An enum schema received a value that is neither a string nor a number.
    #[error("enum values must be strings or numbers, got {value}")]
    InvalidEnumValue {
        /// The rejected value, JSON-encoded.
        value: String,
    },
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_with_params() {
        let issue = Issue::type_mismatch("string", "number");
        assert_eq!(issue.kind, IssueKind::TypeMismatch);
        assert_eq!(issue.message, "Expected string, received number");
        assert_eq!(issue.param("expected"), Some("string"));
        assert_eq!(issue.param("received"), Some("number"));
    }

    #[test]
    fn test_zero_alloc_static_message() {
        let issue = Issue::new(IssueKind::RefinementFailed, "Invalid input");
        assert!(matches!(issue.message, Cow::Borrowed(_)));
    }

    #[test]
    fn test_message_override() {
        let custom: Cow<'static, str> = Cow::Borrowed("Too short");
        let issue = Issue::too_small("default", 3).with_message_override(Some(&custom));
        assert_eq!(issue.message, "Too short");
        assert_eq!(issue.param("minimum"), Some("3"));
    }

    #[test]
    fn test_flatten_splits_root_and_fields() {
        let issues: Issues = [
            Issue::new(IssueKind::UnrecognizedKey, "Unrecognized key(s) in object: 'age'"),
            Issue::missing_required("string").at(["username"].into_iter().collect()),
            Issue::too_small("too short", 3).at(["username"].into_iter().collect()),
        ]
        .into_iter()
        .collect();

        let flat = issues.flatten();
        assert_eq!(flat.form_errors.len(), 1);
        assert_eq!(flat.field_errors["username"], vec!["Required", "too short"]);
    }

    #[test]
    fn test_first_for_field() {
        let issues: Issues = [
            Issue::missing_required("string").at(["email"].into_iter().collect()),
            Issue::missing_required("string").at(["name"].into_iter().collect()),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            issues.first_for_field("name").map(|i| i.path.dotted()),
            Some("name".to_owned())
        );
        assert!(issues.first_for_field("password").is_none());
    }

    #[test]
    fn test_count_kind() {
        let issues: Issues = [
            Issue::missing_required("string"),
            Issue::type_mismatch("number", "string"),
            Issue::missing_required("boolean"),
        ]
        .into_iter()
        .collect();
        assert_eq!(issues.count_kind(IssueKind::MissingRequired), 2);
    }
}
