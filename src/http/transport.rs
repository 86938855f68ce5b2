//! HTTP transport abstraction.
//!
//! All network traffic flows through the [`HttpTransport`] trait, keeping the
//! request-shaping layer independent of any concrete HTTP client and making
//! every operation testable against an in-memory transport.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// HTTP methods used by the Kinetic APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
    /// PUT request.
    Put,
    /// PATCH request.
    Patch,
    /// DELETE request.
    Delete,
}

impl HttpMethod {
    /// Returns the method as its wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully shaped HTTP request ready to be sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL including any query string.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Optional request body.
    pub body: Option<Bytes>,
}

/// An HTTP response as received from the transport, before any
/// interpretation of the body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase associated with the status code.
    pub message: String,
    /// Raw response body.
    pub body: Bytes,
}

/// Errors raised by an [`HttpTransport`] implementation.
///
/// Transport errors are always fatal; an HTTP response with an error status
/// is not a transport error and is delivered as a [`RawResponse`].
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection could not be established or broke mid-request.
    #[error("connection error: {0}")]
    Connection(String),

    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// The request was rejected before a response was produced, for example
    /// when the redirect limit was exceeded.
    #[error("request error: {0}")]
    Request(String),
}

/// Abstraction over an HTTP client capable of performing requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Performs the request and returns the raw response.
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn methods_render_their_wire_names() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn transport_errors_format_with_context() {
        let error = TransportError::Connection("refused".to_string());
        assert_eq!(error.to_string(), "connection error: refused");
        assert_eq!(TransportError::Timeout.to_string(), "request timed out");
    }
}
