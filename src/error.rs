//! Error types shared by the scoring core and the data model.

use thiserror::Error;

/// A field-capture measurement that cannot be scored.
///
/// Raised before any index is computed; the core never clamps or repairs
/// input values, so the caller decides whether to re-prompt or discard.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} is not a number")]
    NotANumber { field: &'static str },

    #[error("{field} must be finite")]
    Infinite { field: &'static str },

    #[error("{field} must be between 0 and 100, got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::NotANumber { field }
            | Self::Infinite { field }
            | Self::OutOfRange { field, .. }
            | Self::Negative { field, .. } => field,
        }
    }
}

/// Returned when a textual road class, role, or similar tag is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseKindError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseKindError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
