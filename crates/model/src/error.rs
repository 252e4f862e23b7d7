use crate::value::PrimitiveType;
use thiserror::Error;

/// A type name that does not resolve to a primitive type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported type: {0}")]
pub struct UnsupportedType(pub String);

/// Formatting a model value for display failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Don't know how to format String to {0}")]
    UnsupportedTarget(String),

    #[error("{value} is not a valid {target} value")]
    InvalidValue {
        value: String,
        target: PrimitiveType,
    },
}

impl From<UnsupportedType> for FormatError {
    fn from(err: UnsupportedType) -> Self {
        Self::UnsupportedTarget(err.0)
    }
}

/// Parsing an external value into the model representation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Don't know how to parse String from {0}")]
    UnsupportedSource(String),
}

impl From<UnsupportedType> for ParseError {
    fn from(err: UnsupportedType) -> Self {
        Self::UnsupportedSource(err.0)
    }
}

/// A well-formed model value does not meet the type's constraints.
///
/// Kept distinct from [`ParseError`] so callers can tell a malformed input
/// from an out-of-constraint one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidateError {
    /// Human-readable message; one sentence per violated constraint
    pub message: String,
    /// Names of the violated constraints (e.g. `"maxLength"`)
    pub violated_constraints: Vec<String>,
}

impl ValidateError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            violated_constraints: Vec::new(),
        }
    }
}
