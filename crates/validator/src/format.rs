//! One-line issue summaries
//!
//! Renders an [`Issues`] collection as a single human-readable string,
//! suitable for logs and error displays:
//!
//! ```text
//! Validation error: Required at "username"; Invalid email at "contact.email"
//! ```

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::foundation::Issues;

/// Controls how [`format_issues`] renders a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Leading text; `None` omits it together with the separator.
    pub prefix: Option<String>,
    /// Between the prefix and the first issue.
    pub prefix_separator: String,
    /// Between two issues.
    pub issue_separator: String,
    /// Appends ` at "<path>"` to issues below the root.
    pub include_path: bool,
    /// Renders at most this many issues.
    pub max_issues: Option<usize>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            prefix: Some("Validation error".to_owned()),
            prefix_separator: ": ".to_owned(),
            issue_separator: "; ".to_owned(),
            include_path: true,
            max_issues: None,
        }
    }
}

impl FormatOptions {
    /// Replaces the prefix.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Removes the prefix.
    #[must_use = "builder methods must be chained or built"]
    pub fn without_prefix(mut self) -> Self {
        self.prefix = None;
        self
    }

    /// Replaces the issue separator.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_issue_separator(mut self, separator: impl Into<String>) -> Self {
        self.issue_separator = separator.into();
        self
    }

    /// Omits issue paths.
    #[must_use = "builder methods must be chained or built"]
    pub fn without_path(mut self) -> Self {
        self.include_path = false;
        self
    }

    /// Renders at most `max` issues.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_issues(mut self, max: usize) -> Self {
        self.max_issues = Some(max);
        self
    }
}

/// Joins `issues` into one line.
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use sieve_validator::format::{FormatOptions, format_issues};
/// use serde_json::json;
///
/// let schema = object().field("username", string()).field("tags", array(string()));
/// let issues = schema
///     .safe_parse(&json!({ "tags": ["a", 1] }))
///     .issues()
///     .cloned()
///     .unwrap();
///
/// assert_eq!(
///     format_issues(&issues, &FormatOptions::default()),
///     r#"Validation error: Required at "username"; Expected string, received number at "tags[1]""#
/// );
/// ```
#[must_use]
pub fn format_issues(issues: &Issues, options: &FormatOptions) -> String {
    let limit = options.max_issues.unwrap_or(usize::MAX);
    let mut body = String::new();
    for (i, issue) in issues.iter().take(limit).enumerate() {
        if i > 0 {
            body.push_str(&options.issue_separator);
        }
        body.push_str(&issue.message);
        if options.include_path && !issue.path.is_root() {
            let _ = write!(body, " at \"{}\"", issue.path);
        }
    }

    match &options.prefix {
        Some(prefix) if body.is_empty() => prefix.clone(),
        Some(prefix) => format!("{prefix}{}{body}", options.prefix_separator),
        None => body,
    }
}
