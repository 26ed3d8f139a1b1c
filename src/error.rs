//! Error types and handling for `WeatherHub`

use thiserror::Error;

/// Main error type for weather lookups.
///
/// Every variant carries a plain-text message that is safe to hand to a
/// caller as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    /// Input rejected before any network call
    #[error("{message}")]
    InvalidInput { message: String },

    /// Upstream answered with an empty result set
    #[error("{message}")]
    NotFound { message: String },

    /// Upstream did not respond within the configured timeout
    #[error("{message}")]
    Timeout { message: String },

    /// Network failure, HTTP error status or undecodable upstream body
    #[error("{message}")]
    UpstreamUnavailable { message: String },

    /// Unexpected failure inside the service
    #[error("{message}")]
    Internal { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Coarse classification of a [`WeatherError`], used by the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidInput,
    NotFound,
    UpstreamUnavailable,
    Internal,
}

pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";

impl WeatherError {
    /// Create a new input validation error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a timeout error with the retry hint shown to users
    #[must_use]
    pub fn timeout() -> Self {
        Self::Timeout {
            message: TIMEOUT_MESSAGE.to_string(),
        }
    }

    /// Create a new upstream failure error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            WeatherError::InvalidInput { .. } => ErrorCategory::InvalidInput,
            WeatherError::NotFound { .. } => ErrorCategory::NotFound,
            WeatherError::Timeout { .. } | WeatherError::UpstreamUnavailable { .. } => {
                ErrorCategory::UpstreamUnavailable
            }
            WeatherError::Internal { .. } | WeatherError::Config { .. } => ErrorCategory::Internal,
        }
    }

    /// Get the user-facing message without any prefix
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            WeatherError::InvalidInput { message }
            | WeatherError::NotFound { message }
            | WeatherError::Timeout { message }
            | WeatherError::UpstreamUnavailable { message }
            | WeatherError::Internal { message }
            | WeatherError::Config { message } => message,
        }
    }
}
