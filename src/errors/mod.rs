//! Error types for the Kinetic SDK.
//!
//! Operations return [`KineticResult`], which wraps [`KineticError`]. The SDK
//! draws a line between two failure classes:
//!
//! - **Fatal errors** always surface as `Err`: transport failures, exceeded
//!   redirect limits, serialization problems, invalid configuration and local
//!   I/O failures during export or import.
//! - **Application-level failures** (an HTTP response with a non-success
//!   status) are ordinarily returned as an `Ok` response carrying the status
//!   and body, so callers can inspect the outcome. Operations that accept an
//!   [`ErrorMode`] can be switched to strict handling, where any status other
//!   than 200 becomes [`KineticError::UnexpectedStatus`].

use thiserror::Error;

use crate::http::{KineticResponse, TransportError};

/// Convenience alias for results returned by SDK operations.
pub type KineticResult<T> = Result<T, KineticError>;

/// Errors produced by the Kinetic SDK.
#[derive(Debug, Error)]
pub enum KineticError {
    /// The client configuration is incomplete or inconsistent.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The configured server URL could not be parsed.
    #[error("invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// An export or import operation was invoked without an export directory.
    #[error("no export directory is configured")]
    MissingExportDirectory,

    /// The HTTP transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A request body or response payload could not be serialized or parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configuration file could not be parsed.
    #[error("configuration file error: {0}")]
    ConfigFile(#[from] serde_yaml::Error),

    /// A local file operation failed during export or import.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A response carried an unexpected HTTP status while strict error
    /// handling was in effect.
    #[error("unexpected response status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code of the offending response.
        status: u16,
        /// Reason phrase reported with the status.
        message: String,
    },
}

/// Controls how an operation treats non-success response statuses.
///
/// Permissive handling mirrors the default behavior of every operation: the
/// response is handed back regardless of status. Strict handling converts any
/// status other than 200 into [`KineticError::UnexpectedStatus`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Any status other than 200 is an error.
    Strict,
    /// Responses are returned unchanged regardless of status.
    #[default]
    Permissive,
}

impl ErrorMode {
    /// Applies this mode to a response.
    pub fn check(self, response: KineticResponse) -> KineticResult<KineticResponse> {
        match self {
            ErrorMode::Strict if response.status() != 200 => Err(KineticError::UnexpectedStatus {
                status: response.status(),
                message: response.message().to_string(),
            }),
            _ => Ok(response),
        }
    }
}
