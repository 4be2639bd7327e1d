//! Error model shared by every entity, document and registry operation.

use thiserror::Error;

/// Result type used across the workspace.
pub type ArgentumResult<T> = Result<T, ArgentumError>;

/// Domain-level error.
///
/// All variants are synchronous failures surfaced to the immediate caller.
/// Validation reports only the first offending field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgentumError {
    /// A required parameter is absent (or blank).
    #[error("The {field} parameter is required")]
    MissingRequiredField { field: String },

    /// A parameter is present but holds the wrong kind of value.
    #[error("The {field} parameter {reason}")]
    InvalidFieldType { field: String, reason: String },

    /// A resolved gateway or document identifier has no implementation.
    #[error("Class '{class}' not found")]
    ClassNotFound { class: String },

    /// An externally supplied amount could not be converted to a number.
    #[error("invalid numeric value: {0}")]
    InvalidNumericValue(String),
}

impl ArgentumError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
        }
    }

    pub fn invalid_type(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFieldType {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn class_not_found(class: impl Into<String>) -> Self {
        Self::ClassNotFound {
            class: class.into(),
        }
    }

    pub fn invalid_numeric(msg: impl Into<String>) -> Self {
        Self::InvalidNumericValue(msg.into())
    }

    /// Whether this error was produced by `validate()`.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredField { .. } | Self::InvalidFieldType { .. }
        )
    }

    /// Name of the offending field, for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField { field } | Self::InvalidFieldType { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }
}
