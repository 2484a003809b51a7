//! Error types for popquiz.
//!
//! All errors are strongly typed using thiserror. This enables pattern
//! matching on specific error conditions and provides clear error messages.
//!
//! Guess matching and row extraction never fail: a malformed row is
//! skipped and a short list is a warning, not an error. Errors here cover
//! the two places where failure is real — invalid extractor configuration
//! and the document fetch.

use thiserror::Error;

/// Configuration errors raised when building an extractor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Row marker cannot be empty")]
    EmptyRowMarker,

    #[error("Entity marker cannot be empty")]
    EmptyEntityMarker,

    #[error("At least one name tag prefix is required")]
    NoNameTagPrefixes,

    #[error("Name tag prefix at index {index} is empty")]
    EmptyNameTagPrefix {
        index: usize,
    },

    #[error("Value tag cannot be empty")]
    EmptyValueTag,

    #[error("Target count must be at least 1")]
    ZeroTarget,
}

/// Fetch errors raised by the document-source collaborator.
///
/// Variants carry plain messages so the library core stays free of any
/// HTTP client types; the `fetch` feature maps client failures into these.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {message}")]
    Request {
        message: String,
    },

    #[error("Source returned status code {code}")]
    Status {
        code: u16,
    },

    #[error("Unexpected response shape: {message}")]
    UnexpectedShape {
        message: String,
    },
}

/// Top-level error type for popquiz.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl QuizError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if this is a fetch error.
    #[must_use]
    pub const fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    /// Returns true if this error is retryable.
    ///
    /// Only transient fetch conditions qualify; configuration errors will
    /// not change on retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Config(_) | Self::Internal { .. } => false,
            Self::Fetch(e) => match e {
                FetchError::Request { .. } => true,
                FetchError::Status { code } => *code >= 500,
                FetchError::UnexpectedShape { .. } => false,
            },
        }
    }
}

/// Result type alias for popquiz operations.
pub type QuizResult<T> = Result<T, QuizError>;
