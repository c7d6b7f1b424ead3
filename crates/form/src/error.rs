/// Error type for form operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// The schema does not declare a field with this name.
    #[error("unknown field `{name}`")]
    UnknownField {
        /// The rejected field name.
        name: String,
    },
}

impl FormError {
    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::UnknownField { .. } => "FORM_UNKNOWN_FIELD",
        }
    }
}
