//! Mock implementations for testing.
//!
//! [`MockTransport`] replaces the HTTP stack with an in-memory queue of
//! canned responses while recording every request it receives, so tests can
//! assert on request ordering, counts, URLs, headers and bodies.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use crate::http::{HttpMethod, HttpRequest, HttpTransport, RawResponse, TransportError};

/// Mock HTTP transport for testing.
///
/// Responses are replayed in the order they were enqueued; sending a request
/// with an empty queue fails with a transport error.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// use kinetic_sdk::mocks::MockTransport;
/// use kinetic_sdk::{HttpMethod, HttpRequest, HttpTransport};
///
/// # tokio_test::block_on(async {
/// let transport = MockTransport::new();
/// transport.enqueue_json(200, r#"{"status": "ok"}"#);
///
/// let request = HttpRequest {
///     method: HttpMethod::Get,
///     url: "https://kinetic.example.com/app/api/v1/version".to_string(),
///     headers: HashMap::new(),
///     body: None,
/// };
/// let response = transport.send(request).await.unwrap();
///
/// assert_eq!(response.status, 200);
/// transport.verify_request_count(1);
/// # });
/// ```
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<Result<RawResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    /// Creates a new mock transport with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Enqueues a response to be returned by the next request.
    pub fn enqueue_response(&self, response: RawResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Enqueues a response with the given status code and body. The reason
    /// phrase is derived from the status code.
    pub fn enqueue_json(&self, status: u16, body: &str) {
        let message = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default()
            .to_string();
        self.enqueue_response(RawResponse {
            status,
            message,
            body: Bytes::from(body.to_string()),
        });
    }

    /// Enqueues a transport error.
    pub fn enqueue_error(&self, error: TransportError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Returns all requests that were made.
    pub fn get_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the last request that was made.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Returns how many requests were made.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Asserts that exactly `expected` requests were made.
    pub fn verify_request_count(&self, expected: usize) {
        let actual = self.requests.lock().unwrap().len();
        assert_eq!(
            actual, expected,
            "expected {expected} requests, got {actual}"
        );
    }

    /// Asserts that the request at `index` used the expected method and that
    /// its URL contains the given fragment.
    pub fn verify_request(&self, index: usize, method: HttpMethod, url_contains: &str) {
        let requests = self.requests.lock().unwrap();
        assert!(index < requests.len(), "no request at index {index}");

        let request = &requests[index];
        assert_eq!(
            request.method, method,
            "expected method {method}, got {}",
            request.method
        );
        assert!(
            request.url.contains(url_contains),
            "expected URL to contain '{url_contains}', got '{}'",
            request.url
        );
    }

    /// Clears all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request);

        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(TransportError::Connection(
                "no response configured in MockTransport".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn request(method: HttpMethod, url: &str) -> HttpRequest {
        HttpRequest {
            method,
            url: url.to_string(),
            headers: HashMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn responses_are_replayed_in_order() {
        let transport = MockTransport::new();
        transport.enqueue_json(200, r#"{"id": 1}"#);
        transport.enqueue_json(404, r#"{"id": 2}"#);

        let first = transport
            .send(request(HttpMethod::Get, "https://example.com/1"))
            .await
            .unwrap();
        let second = transport
            .send(request(HttpMethod::Get, "https://example.com/2"))
            .await
            .unwrap();

        assert_eq!(first.status, 200);
        assert_eq!(first.message, "OK");
        assert_eq!(second.status, 404);
        assert_eq!(second.message, "Not Found");
        transport.verify_request_count(2);
        transport.verify_request(0, HttpMethod::Get, "/1");
    }

    #[tokio::test]
    async fn queued_errors_are_returned() {
        let transport = MockTransport::new();
        transport.enqueue_error(TransportError::Timeout);

        let result = transport
            .send(request(HttpMethod::Get, "https://example.com"))
            .await;

        assert!(matches!(result, Err(TransportError::Timeout)));
    }

    #[tokio::test]
    async fn an_empty_queue_is_a_connection_error() {
        let transport = MockTransport::new();

        let result = transport
            .send(request(HttpMethod::Get, "https://example.com"))
            .await;

        assert!(matches!(result, Err(TransportError::Connection(_))));
    }
}
