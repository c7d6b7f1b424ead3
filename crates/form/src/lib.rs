//! # sieve-form
//!
//! Form state driven by a [`sieve_validator`] object schema: field values,
//! touched and dirty tracking, per-field errors and a submit/reset lifecycle.
//!
//! ## Quick Start
//!
//! ```
//! use sieve_form::{Form, FormConfig};
//! use sieve_validator::prelude::*;
//! use serde_json::json;
//!
//! let schema = object()
//!     .field("name", string().min(3).max(10))
//!     .field("email", string().email());
//! let config = FormConfig::new()
//!     .with_default("name", "")
//!     .with_default("email", "");
//! let mut form = Form::new(schema, config);
//!
//! let errors = form.handle_submit(|_| ()).unwrap_err();
//! assert_eq!(errors["email"].message, "Invalid email");
//!
//! form.set_value("name", "John")?;
//! form.set_value("email", "john@example.com")?;
//! let submitted = form.handle_submit(|values| values).unwrap();
//! assert_eq!(submitted, json!({ "name": "John", "email": "john@example.com" }));
//!
//! form.reset();
//! assert_eq!(form.value("name"), Some(&json!("")));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod resolver;
pub mod state;

pub use config::{CriteriaMode, FormConfig, RevalidateMode, ValidationMode};
pub use error::FormError;
pub use resolver::{FieldError, FieldErrors, ROOT_KEY, Resolution, field_errors, field_key, resolve};
pub use state::Form;
