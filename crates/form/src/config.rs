//! Form configuration
//!
//! [`FormConfig`] decides when field values are validated and how many
//! messages each field keeps. It deserializes from JSON, so forms can be
//! configured alongside the rest of an application's settings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// When a field is validated before the first submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Only on submit.
    #[default]
    OnSubmit,
    /// When the field loses focus.
    OnBlur,
    /// On every value change.
    OnChange,
    /// On the first blur, then on every change.
    OnTouched,
    /// On blur and on change.
    All,
}

/// When a field is validated again after a submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevalidateMode {
    /// On every value change.
    #[default]
    OnChange,
    /// When the field loses focus.
    OnBlur,
    /// Only on the next submit.
    OnSubmit,
}

/// How many messages each field keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaMode {
    /// The first issue of each field.
    #[default]
    FirstError,
    /// The first issue, plus every message grouped by issue kind.
    All,
}

/// Behavior of a [`Form`](crate::Form).
///
/// # Examples
///
/// ```
/// use sieve_form::{CriteriaMode, FormConfig, ValidationMode};
///
/// let config: FormConfig = serde_json::from_str(
///     r#"{ "mode": "on_blur", "criteria_mode": "all", "default_values": { "name": "" } }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.mode, ValidationMode::OnBlur);
/// assert_eq!(config.criteria_mode, CriteriaMode::All);
/// assert_eq!(config.default_values["name"], "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Validation trigger before the first submit.
    pub mode: ValidationMode,
    /// Validation trigger after a submit.
    pub revalidate_mode: RevalidateMode,
    /// Messages kept per field.
    pub criteria_mode: CriteriaMode,
    /// Initial values, restored by `reset`.
    pub default_values: Map<String, Value>,
}

impl FormConfig {
    /// Default configuration: validate on submit, revalidate on change.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the validation trigger.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the revalidation trigger.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_revalidate_mode(mut self, mode: RevalidateMode) -> Self {
        self.revalidate_mode = mode;
        self
    }

    /// Sets the criteria mode.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_criteria_mode(mut self, mode: CriteriaMode) -> Self {
        self.criteria_mode = mode;
        self
    }

    /// Adds a default value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.default_values.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = FormConfig::new();
        assert_eq!(config.mode, ValidationMode::OnSubmit);
        assert_eq!(config.revalidate_mode, RevalidateMode::OnChange);
        assert_eq!(config.criteria_mode, CriteriaMode::FirstError);
        assert!(config.default_values.is_empty());
    }

    #[test]
    fn test_builder_matches_json() {
        let built = FormConfig::new()
            .with_mode(ValidationMode::OnTouched)
            .with_revalidate_mode(RevalidateMode::OnBlur)
            .with_default("email", "");
        let parsed: FormConfig = serde_json::from_value(json!({
            "mode": "on_touched",
            "revalidate_mode": "on_blur",
            "default_values": { "email": "" }
        }))
        .unwrap();
        assert_eq!(built, parsed);
    }
}
