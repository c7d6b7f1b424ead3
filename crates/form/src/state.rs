//! Form state
//!
//! A [`Form`] owns the current values of an object schema's fields, tracks
//! which fields were touched or changed, and keeps the field errors produced
//! by the resolver. Validation runs on the triggers chosen in
//! [`FormConfig`].

use indexmap::IndexSet;
use serde_json::{Map, Value};
use sieve_validator::schema::Schema;
use sieve_validator::validators::ObjectSchema;

use crate::config::{FormConfig, RevalidateMode, ValidationMode};
use crate::error::FormError;
use crate::resolver::{FieldError, FieldErrors, Resolution, resolve};

/// Values, errors and interaction state of one form.
///
/// # Examples
///
/// ```
/// use sieve_form::{Form, FormConfig};
/// use sieve_validator::prelude::*;
///
/// let schema = object().field("name", string().min(3));
/// let mut form = Form::new(schema, FormConfig::new().with_default("name", ""));
///
/// form.set_value("name", "Al")?;
/// assert!(form.handle_submit(|_| ()).is_err());
/// assert!(form.error("name").is_some());
///
/// // Revalidates on change after the first submit.
/// form.set_value("name", "Alice")?;
/// assert!(form.error("name").is_none());
/// # Ok::<(), sieve_form::FormError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Form {
    schema: Schema,
    fields: IndexSet<String>,
    config: FormConfig,
    values: Map<String, Value>,
    errors: FieldErrors,
    touched: IndexSet<String>,
    dirty: IndexSet<String>,
    submit_count: usize,
}

impl Form {
    /// A form over `schema`, starting from the configured default values.
    pub fn new(schema: ObjectSchema, config: FormConfig) -> Self {
        let fields = schema.keys().map(str::to_owned).collect();
        Self {
            schema: schema.into(),
            fields,
            values: config.default_values.clone(),
            config,
            errors: FieldErrors::new(),
            touched: IndexSet::new(),
            dirty: IndexSet::new(),
            submit_count: 0,
        }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Current values.
    #[must_use]
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Current value of one field.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Current errors, keyed by dotted path.
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The error of one field or nested path.
    #[must_use]
    pub fn error(&self, name: &str) -> Option<&FieldError> {
        self.errors.get(name)
    }

    /// Returns `true` when no errors are stored.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `true` once the field lost focus at least once.
    #[must_use]
    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    /// Returns `true` while the field differs from its default.
    #[must_use]
    pub fn is_dirty(&self, name: &str) -> bool {
        self.dirty.contains(name)
    }

    /// Number of submit attempts since the last reset.
    #[must_use]
    pub fn submit_count(&self) -> usize {
        self.submit_count
    }

    /// Returns `true` after at least one submit attempt.
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submit_count > 0
    }

    fn ensure_field(&self, name: &str) -> Result<(), FormError> {
        if self.fields.contains(name) {
            Ok(())
        } else {
            Err(FormError::UnknownField {
                name: name.to_owned(),
            })
        }
    }

    /// Stores a field value, validating the field when the mode asks for it.
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownField`] if the schema has no such field.
    pub fn set_value(&mut self, name: &str, value: impl Into<Value>) -> Result<(), FormError> {
        self.ensure_field(name)?;
        let value = value.into();
        if self.config.default_values.get(name) == Some(&value) {
            self.dirty.shift_remove(name);
        } else {
            self.dirty.insert(name.to_owned());
        }
        self.values.insert(name.to_owned(), value);

        let validate = if self.is_submitted() {
            self.config.revalidate_mode == RevalidateMode::OnChange
        } else {
            match self.config.mode {
                ValidationMode::OnChange | ValidationMode::All => true,
                ValidationMode::OnTouched => self.is_touched(name),
                ValidationMode::OnSubmit | ValidationMode::OnBlur => false,
            }
        };
        if validate {
            self.validate_field(name);
        }
        Ok(())
    }

    /// Marks a field as touched, validating it when the mode asks for it.
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownField`] if the schema has no such field.
    pub fn blur(&mut self, name: &str) -> Result<(), FormError> {
        self.ensure_field(name)?;
        self.touched.insert(name.to_owned());

        let validate = if self.is_submitted() {
            self.config.revalidate_mode == RevalidateMode::OnBlur
        } else {
            matches!(
                self.config.mode,
                ValidationMode::OnBlur | ValidationMode::OnTouched | ValidationMode::All
            )
        };
        if validate {
            self.validate_field(name);
        }
        Ok(())
    }

    /// Validates every field, replacing all stored errors.
    ///
    /// Returns `true` when the values are valid.
    pub fn validate(&mut self) -> bool {
        let resolution = self.resolve();
        self.errors = resolution.errors;
        self.is_valid()
    }

    /// Validates all values but only updates the errors of `name` and the
    /// paths below it.
    fn validate_field(&mut self, name: &str) {
        let resolution = self.resolve();
        let prefix = format!("{name}.");
        let owned = |key: &str| key == name || key.starts_with(&prefix);

        self.errors.retain(|key, _| !owned(key.as_str()));
        self.errors.extend(
            resolution
                .errors
                .into_iter()
                .filter(|(key, _)| owned(key.as_str())),
        );
        tracing::trace!(field = name, valid = !self.errors.contains_key(name), "field validated");
    }

    fn resolve(&self) -> Resolution {
        resolve(
            &self.schema,
            &Value::Object(self.values.clone()),
            self.config.criteria_mode,
        )
    }

    /// Validates all values and calls `on_valid` with the parsed value.
    ///
    /// # Errors
    ///
    /// The field errors when validation fails; `on_valid` is not called and
    /// the errors are stored on the form.
    pub fn handle_submit<T>(&mut self, on_valid: impl FnOnce(Value) -> T) -> Result<T, FieldErrors> {
        self.submit_count += 1;
        let resolution = self.resolve();
        self.errors = resolution.errors;

        match resolution.values {
            Some(parsed) if self.errors.is_empty() => {
                tracing::debug!(submit_count = self.submit_count, "form submitted");
                Ok(on_valid(parsed))
            }
            _ => {
                tracing::debug!(
                    submit_count = self.submit_count,
                    fields = self.errors.len(),
                    "form submit rejected"
                );
                Err(self.errors.clone())
            }
        }
    }

    /// Restores the default values and clears errors and interaction state.
    pub fn reset(&mut self) {
        self.values = self.config.default_values.clone();
        self.errors.clear();
        self.touched.clear();
        self.dirty.clear();
        self.submit_count = 0;
    }
}
