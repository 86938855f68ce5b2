//! The response value returned by every SDK operation.

use serde_json::{json, Value};

use super::transport::RawResponse;
use crate::errors::KineticResult;

/// Outcome of a single API call.
///
/// Every operation returns one of these regardless of HTTP status; callers
/// inspect [`status`](Self::status) to decide how to proceed. The body is
/// available both as the raw string and as parsed JSON. When the body is not
/// valid JSON, [`content`](Self::content) is the wrapper object
/// `{"raw": "<body>"}` so content navigation never panics, while
/// [`content_string`](Self::content_string) still holds the unmodified body.
#[derive(Debug, Clone, PartialEq)]
pub struct KineticResponse {
    status: u16,
    message: String,
    content_string: String,
    content: Value,
}

impl KineticResponse {
    /// Interprets a raw transport response.
    pub fn from_raw(raw: RawResponse) -> Self {
        let content_string = String::from_utf8_lossy(&raw.body).into_owned();
        let content = serde_json::from_str(&content_string)
            .unwrap_or_else(|_| json!({ "raw": content_string.clone() }));

        Self {
            status: raw.status,
            message: raw.message,
            content_string,
            content,
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Reason phrase reported with the status code.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Parsed response body.
    pub fn content(&self) -> &Value {
        &self.content
    }

    /// Raw response body.
    pub fn content_string(&self) -> &str {
        &self.content_string
    }

    /// Returns a copy of this response carrying a replacement body.
    ///
    /// Both the parsed content and the raw string are derived from the same
    /// value in one step, so the two representations cannot diverge. Used by
    /// aggregating operations that merge several pages into one response.
    pub fn with_content(self, content: Value) -> KineticResult<Self> {
        let content_string = serde_json::to_string(&content)?;
        Ok(Self {
            content,
            content_string,
            ..self
        })
    }
}
