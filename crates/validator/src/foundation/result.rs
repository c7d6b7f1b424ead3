//! Tagged parse result returned by `safe_parse`

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::error::{Issues, ValidationError};

/// Outcome of `safe_parse`: the parsed value or every issue found.
///
/// Serializes as `{ "success": true, "data": ... }` or
/// `{ "success": false, "issues": [...] }`.
#[derive(Debug, Clone, PartialEq)]
pub enum SafeParse {
    /// The input conforms; holds the parsed (defaulted, coerced, stripped) value.
    Success(Value),
    /// The input does not conform; never empty.
    Failure(Issues),
}

impl SafeParse {
    /// Returns `true` on success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` on failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The parsed value, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The issues, if any.
    pub fn issues(&self) -> Option<&Issues> {
        match self {
            Self::Success(_) => None,
            Self::Failure(issues) => Some(issues),
        }
    }

    /// Converts into the value, discarding issues.
    pub fn ok(self) -> Option<Value> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Converts into a `Result` for `?` propagation.
    pub fn into_result(self) -> Result<Value, ValidationError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(issues) => Err(ValidationError::new(issues)),
        }
    }
}

impl From<SafeParse> for Result<Value, ValidationError> {
    fn from(result: SafeParse) -> Self {
        result.into_result()
    }
}

impl Serialize for SafeParse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SafeParse", 2)?;
        match self {
            Self::Success(value) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", value)?;
            }
            Self::Failure(issues) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("issues", issues)?;
            }
        }
        state.end()
    }
}
