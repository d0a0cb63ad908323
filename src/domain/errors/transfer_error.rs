//! Stock transfer error types.

use thiserror::Error;

use super::ApiError;

/// Errors raised when submitting a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Nothing has been scanned.
    #[error("No items have been scanned yet.")]
    NoItems,

    /// No destination location is set.
    #[error("Destination not set.")]
    NoDestination,

    /// Several validation problems, in check order.
    #[error("{}", join_messages(.0, "\n"))]
    Invalid(Vec<TransferError>),

    /// The server rejected or failed the transfer.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl TransferError {
    /// Returns the individual validation problems, or the error itself.
    #[must_use]
    pub fn problems(&self) -> Vec<&Self> {
        match self {
            Self::Invalid(errors) => errors.iter().collect(),
            other => vec![other],
        }
    }

    /// Joins problem messages with the given separator.
    #[must_use]
    pub fn joined(&self, separator: &str) -> String {
        match self {
            Self::Invalid(errors) => join_messages(errors, separator),
            other => other.to_string(),
        }
    }
}

fn join_messages(errors: &[TransferError], separator: &str) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}
