//! Error types for Figma API operations.
//!
//! Every failure surfaced by the service is one of four kinds so callers can
//! branch on shape: a missing runtime capability, a non-success response from
//! the API, a request that never completed, or anything else.

use thiserror::Error;

use crate::download::DownloadError;

/// Errors that can occur while talking to the Figma API or writing assets.
#[derive(Debug, Clone, Error)]
pub enum FigmaError {
    /// The execution environment cannot perform network requests at all.
    ///
    /// Raised before any I/O is attempted. Retrying will not help.
    #[error("network capability unavailable: {message}")]
    Capability {
        /// What is missing and how to fix it.
        message: String,
    },

    /// The API answered with a non-success HTTP status.
    #[error("Figma API returned HTTP {status}: {message}")]
    Service {
        /// The HTTP status code.
        status: u16,
        /// The status reason phrase, or `"Unknown error"`.
        message: String,
    },

    /// The request never produced a response (DNS, connect, TLS, proxy, timeout).
    #[error("network error: {message}")]
    Transport {
        /// The underlying error message.
        message: String,
    },

    /// Any other unexpected failure.
    #[error("failed to {context}: {message}")]
    Unknown {
        /// What the operation was doing.
        context: String,
        /// The underlying error message.
        message: String,
    },
}

impl FigmaError {
    /// Creates a `Capability` error.
    #[must_use]
    pub fn capability(message: impl Into<String>) -> Self {
        Self::Capability {
            message: message.into(),
        }
    }

    /// Creates a `Service` error, falling back to `"Unknown error"` when the
    /// status has no reason phrase.
    #[must_use]
    pub fn service(status: u16, message: Option<&str>) -> Self {
        Self::Service {
            status,
            message: message
                .filter(|m| !m.is_empty())
                .unwrap_or("Unknown error")
                .to_string(),
        }
    }

    /// Creates a `Transport` error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates an `Unknown` error with context.
    #[must_use]
    pub fn unknown(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unknown {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Returns the HTTP status for `Service` errors and `None` for every other kind.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<DownloadError> for FigmaError {
    fn from(error: DownloadError) -> Self {
        match error {
            DownloadError::Network { source, .. } => Self::transport(source.to_string()),
            DownloadError::HttpStatus { status, .. } => {
                let reason = reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason());
                Self::service(status, reason)
            }
            other @ (DownloadError::Io { .. } | DownloadError::InvalidFileName { .. }) => {
                Self::unknown("download asset", other.to_string())
            }
        }
    }
}
