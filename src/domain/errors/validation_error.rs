//! Row edit validation errors.

use thiserror::Error;

/// A row edit was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RowValidationError {
    /// Field the error relates to, if any.
    pub field: Option<String>,
    /// Human-readable message shown inline in the edit dialog.
    pub message: String,
}

impl RowValidationError {
    /// Creates an error attached to a field.
    #[must_use]
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates an error not attached to a field.
    #[must_use]
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    /// Merges several errors into one, joining messages with `". "`.
    #[must_use]
    pub fn combine(errors: Vec<Self>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.into_iter().next(),
            _ => Some(Self::general(
                errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join(". "),
            )),
        }
    }
}

/// Model table configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The sort column is not a field of the row type.
    #[error("Not a valid sort column, options are {options:?}")]
    InvalidSortColumn {
        /// Requested column.
        column: String,
        /// Valid field names.
        options: Vec<&'static str>,
    },
}
