//! Per-call parse state and options
//!
//! A [`ParseContext`] is created by every `parse`/`safe_parse` call. It tracks
//! the path of the value currently being validated and collects the issues
//! reported so far. Schemas themselves stay immutable.

use serde::{Deserialize, Serialize};

use super::error::{Issue, Issues};
use super::path::{Path, PathSegment};
use crate::validators::UnknownKeys;

// ============================================================================
// OPTIONS
// ============================================================================

/// Options that apply to a whole parse call.
///
/// Deserializable so it can live in an application's configuration file:
///
/// ```
/// use sieve_validator::foundation::ParseOptions;
/// use sieve_validator::validators::UnknownKeys;
///
/// let options: ParseOptions =
///     serde_json::from_str(r#"{ "unknown_keys": "strict", "max_issues": 10 }"#).unwrap();
/// assert_eq!(options.unknown_keys, UnknownKeys::Strict);
/// assert_eq!(options.max_issues, Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Policy for objects that did not choose one explicitly.
    pub unknown_keys: UnknownKeys,
    /// Maximum number of issues reported; the result is still a failure.
    pub max_issues: Option<usize>,
}

impl ParseOptions {
    /// Default options: strip unknown keys, report every issue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback unknown-key policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.unknown_keys = policy;
        self
    }

    /// Caps the number of reported issues.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_issues(mut self, max: usize) -> Self {
        self.max_issues = Some(max);
        self
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// Marker returned when a schema rejected its input.
///
/// The reason lives in the [`ParseContext`] as one or more issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected;

/// Result of validating a single node.
///
/// - `Ok(Some(value))`: accepted, `value` is the parsed output;
/// - `Ok(None)`: the value is absent and the schema allows absence;
/// - `Err(Rejected)`: at least one issue was reported.
pub type Outcome = Result<Option<serde_json::Value>, Rejected>;

// ============================================================================
// CONTEXT
// ============================================================================

/// Mutable state threaded through one validation call.
#[derive(Debug)]
pub struct ParseContext<'o> {
    options: &'o ParseOptions,
    path: Path,
    issues: Vec<Issue>,
}

impl<'o> ParseContext<'o> {
    /// Creates a context at the root path.
    #[must_use]
    pub fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            path: Path::root(),
            issues: Vec::new(),
        }
    }

    /// Options of the current call.
    pub fn options(&self) -> &'o ParseOptions {
        self.options
    }

    /// Path of the value currently being validated.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records an issue at the current path (extended by the issue's own,
    /// relative path) and returns [`Rejected`] for convenient early returns.
    pub fn report(&mut self, issue: Issue) -> Rejected {
        let path = self.path.concat(&issue.path);
        self.issues.push(issue.at(path));
        Rejected
    }

    /// Runs `f` with `segment` appended to the current path.
    pub fn scoped<T>(
        &mut self,
        segment: impl Into<PathSegment>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.path.push(segment);
        let result = f(self);
        self.path.pop();
        result
    }

    /// Creates an empty context at the same path, used to try an alternative
    /// without committing its issues.
    #[must_use]
    pub fn fork(&self) -> ParseContext<'o> {
        ParseContext {
            options: self.options,
            path: self.path.clone(),
            issues: Vec::new(),
        }
    }

    /// Moves the issues of a forked context into this one.
    pub fn absorb(&mut self, other: ParseContext<'o>) {
        self.issues.extend(other.issues);
    }

    /// Number of issues recorded so far.
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Returns `true` when nothing has been reported.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Turns the work since `checkpoint` into an outcome: `value` if no new
    /// issue was reported, [`Rejected`] otherwise.
    pub fn settle(&self, checkpoint: usize, value: serde_json::Value) -> Outcome {
        if self.issues.len() > checkpoint {
            Err(Rejected)
        } else {
            Ok(Some(value))
        }
    }

    /// Consumes the context, applying `max_issues`.
    #[must_use]
    pub fn into_issues(self) -> Issues {
        let mut issues: Issues = self.issues.into_iter().collect();
        if let Some(max) = self.options.max_issues {
            issues.truncate(max.max(1));
        }
        issues
    }
}
