//! Schema resolver
//!
//! Turns a parse of all form values into per-field errors keyed by the dotted
//! path of each issue (`email`, `address.city`, `tags.0`). Issues at the root
//! of the value are keyed by [`ROOT_KEY`].

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use sieve_validator::foundation::{Issue, IssueKind, Issues, SafeParse, Validate};

use crate::config::CriteriaMode;

/// Key of issues reported against the whole form.
pub const ROOT_KEY: &str = "root";

/// Errors of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Kind of the first issue.
    pub kind: IssueKind,
    /// Message of the first issue.
    pub message: String,
    /// Every message grouped by issue kind code; empty unless the criteria
    /// mode is [`CriteriaMode::All`].
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub types: IndexMap<String, Vec<String>>,
}

impl FieldError {
    fn from_issue(issue: &Issue) -> Self {
        Self {
            kind: issue.kind,
            message: issue.message.to_string(),
            types: IndexMap::new(),
        }
    }
}

/// Field errors keyed by dotted path, in the order issues were reported.
pub type FieldErrors = IndexMap<String, FieldError>;

/// Outcome of resolving form values against a schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// The parsed values; `None` when any field has errors.
    pub values: Option<Value>,
    /// Errors per field; empty on success.
    pub errors: FieldErrors,
}

impl Resolution {
    /// Returns `true` when the values passed the schema.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Dotted field key of an issue.
#[must_use]
pub fn field_key(issue: &Issue) -> String {
    if issue.path.is_root() {
        ROOT_KEY.to_owned()
    } else {
        issue.path.dotted()
    }
}

/// Groups `issues` by field.
#[must_use]
pub fn field_errors(issues: &Issues, criteria: CriteriaMode) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for issue in issues {
        let error = errors
            .entry(field_key(issue))
            .or_insert_with(|| FieldError::from_issue(issue));
        if criteria == CriteriaMode::All {
            error
                .types
                .entry(issue.kind.code().to_owned())
                .or_default()
                .push(issue.message.to_string());
        }
    }
    errors
}

/// Parses `values` with `schema` and maps any issues to field errors.
///
/// # Examples
///
/// ```
/// use sieve_form::{CriteriaMode, resolve};
/// use sieve_validator::prelude::*;
/// use serde_json::json;
///
/// let schema = object()
///     .field("name", string().min(3))
///     .field("address", object().field("city", string()));
///
/// let resolution = resolve(&schema, &json!({ "name": "Al", "address": {} }), CriteriaMode::FirstError);
///
/// assert!(!resolution.is_valid());
/// assert_eq!(
///     resolution.errors.keys().collect::<Vec<_>>(),
///     ["name", "address.city"]
/// );
/// ```
pub fn resolve<V>(schema: &V, values: &Value, criteria: CriteriaMode) -> Resolution
where
    V: Validate + ?Sized,
{
    match schema.safe_parse(values) {
        SafeParse::Success(parsed) => Resolution {
            values: Some(parsed),
            errors: FieldErrors::new(),
        },
        SafeParse::Failure(issues) => {
            let errors = field_errors(&issues, criteria);
            tracing::debug!(fields = errors.len(), "form values rejected");
            Resolution {
                values: None,
                errors,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use sieve_validator::prelude::*;

    fn schema() -> ObjectSchema {
        object()
            .field("name", string().min(3).max(10))
            .field("email", string().min(12).email())
    }

    #[test]
    fn test_success_returns_parsed_values() {
        let resolution = resolve(
            &schema(),
            &json!({ "name": "John", "email": "john@example.com", "extra": 1 }),
            CriteriaMode::FirstError,
        );
        assert!(resolution.is_valid());
        assert_eq!(
            resolution.values,
            Some(json!({ "name": "John", "email": "john@example.com" }))
        );
    }

    #[test]
    fn test_first_error_keeps_one_message() {
        let resolution = resolve(
            &schema(),
            &json!({ "name": "John", "email": "bad" }),
            CriteriaMode::FirstError,
        );
        let error = &resolution.errors["email"];
        assert_eq!(error.kind, IssueKind::OutOfRange);
        assert_eq!(error.message, "String must contain at least 12 character(s)");
        assert!(error.types.is_empty());
    }

    #[test]
    fn test_all_criteria_groups_by_kind() {
        let resolution = resolve(
            &schema(),
            &json!({ "name": "John", "email": "bad" }),
            CriteriaMode::All,
        );
        let error = &resolution.errors["email"];
        assert_eq!(
            error.types.keys().map(String::as_str).collect::<Vec<_>>(),
            ["out_of_range", "pattern_mismatch"]
        );
        assert_eq!(error.types["pattern_mismatch"], ["Invalid email"]);
    }

    #[test]
    fn test_root_issues_use_root_key() {
        let schema = object()
            .field("a", string())
            .field("b", string())
            .refine(|v| v["a"] != v["b"], "Fields must differ");
        let resolution = resolve(&schema, &json!({ "a": "x", "b": "x" }), CriteriaMode::FirstError);
        assert_eq!(resolution.errors[ROOT_KEY].message, "Fields must differ");
    }
}
