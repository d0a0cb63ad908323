//! Remote API error types.

use thiserror::Error;

/// Errors raised while talking to the inventory service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("request rejected by server: {message}")]
    Rejected { message: String },

    #[error("{entity} not found")]
    NotFound { entity: String },

    #[error("{0}")]
    NoMatch(String),

    #[error("Barcode is a {found}, expected one of: {expected}")]
    NotWhitelisted { found: String, expected: String },

    #[error("{message}")]
    BadRequest { message: String },

    #[error("invalid response from server: {message}")]
    InvalidResponse { message: String },

    #[error("missing configuration: {variable} is not set")]
    MissingConfig { variable: String },

    #[error("{message}")]
    Unexpected { message: String },
}

impl ApiError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates rejected error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates not-found error.
    #[must_use]
    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
        }
    }

    /// Creates bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Creates invalid response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Creates missing configuration error.
    #[must_use]
    pub fn missing_config(variable: impl Into<String>) -> Self {
        Self::MissingConfig {
            variable: variable.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Returns whether the barcode could not be resolved to an accepted entity.
    #[must_use]
    pub const fn is_scan_miss(&self) -> bool {
        matches!(self, Self::NoMatch(_) | Self::NotWhitelisted { .. })
    }
}
