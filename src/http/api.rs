//! Request shaping shared by every product client.
//!
//! [`ApiClient`] owns the transport, the API root, and the credentials, and
//! turns `(method, path, params, body)` into a wire request: it joins the
//! path to the root, encodes query parameters, injects the default headers,
//! serializes the body, and applies the 502 retry loop.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use bytes::Bytes;
use percent_encoding::{percent_encode, AsciiSet, NON_ALPHANUMERIC};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, warn};
use url::form_urlencoded;

use super::response::KineticResponse;
use super::transport::{HttpMethod, HttpRequest, HttpTransport};
use crate::config::KineticConfig;
use crate::errors::KineticResult;

/// Characters escaped when an identifier is inserted as a URL path segment.
/// Everything outside the RFC 3986 unreserved set is encoded, so decoding a
/// segment always recovers the original identifier.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes an identifier for use as a single URL path segment.
pub fn encode_segment(value: &str) -> String {
    percent_encode(value.as_bytes(), PATH_SEGMENT).to_string()
}

/// Shapes and performs requests against one API root.
///
/// Cloning is cheap; the transport is shared behind an `Arc` and the rest is
/// small owned data.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    api_url: String,
    username: String,
    password: SecretString,
    gateway_retry_limit: u32,
    gateway_retry_delay: Duration,
}

impl ApiClient {
    /// Creates a client for the given API root.
    pub fn new(transport: Arc<dyn HttpTransport>, api_url: String, config: &KineticConfig) -> Self {
        Self {
            transport,
            api_url: api_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            gateway_retry_limit: config.options.gateway_retry_limit,
            gateway_retry_delay: config.options.gateway_retry_delay,
        }
    }

    /// The API root this client sends requests to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Performs a GET request.
    pub async fn get(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.request::<()>(HttpMethod::Get, path, params, None, None)
            .await
    }

    /// Performs a POST request with a JSON body.
    pub async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> KineticResult<KineticResponse> {
        self.request(HttpMethod::Post, path, &[], Some(body), None)
            .await
    }

    /// Performs a POST request with a JSON body and query parameters.
    pub async fn post_with_params<B: Serialize>(
        &self,
        path: &str,
        params: &[(String, String)],
        body: &B,
    ) -> KineticResult<KineticResponse> {
        self.request(HttpMethod::Post, path, params, Some(body), None)
            .await
    }

    /// Performs a PUT request with a JSON body.
    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> KineticResult<KineticResponse> {
        self.request(HttpMethod::Put, path, &[], Some(body), None)
            .await
    }

    /// Performs a PATCH request with a JSON body.
    pub async fn patch<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> KineticResult<KineticResponse> {
        self.request(HttpMethod::Patch, path, &[], Some(body), None)
            .await
    }

    /// Performs a DELETE request.
    pub async fn delete(&self, path: &str) -> KineticResult<KineticResponse> {
        self.request::<()>(HttpMethod::Delete, path, &[], None, None)
            .await
    }

    /// Performs a fully specified request.
    ///
    /// Query parameters are appended in the given order and repeated keys are
    /// preserved. Entries in `extra_headers` are merged over the default
    /// basic-auth and JSON headers, overriding them on collision. A 502 Bad
    /// Gateway response is retried up to the configured limit with the
    /// configured delay between attempts; every other status is returned
    /// as-is.
    pub async fn request<B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        params: &[(String, String)],
        body: Option<&B>,
        extra_headers: Option<HashMap<String, String>>,
    ) -> KineticResult<KineticResponse> {
        let url = self.build_url(path, params);
        let body_bytes = match body {
            Some(value) => Some(Bytes::from(serde_json::to_vec(value)?)),
            None => None,
        };
        let mut headers = self.default_headers(body_bytes.is_some());
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let mut attempt = 0u32;
        loop {
            let request = HttpRequest {
                method,
                url: url.clone(),
                headers: headers.clone(),
                body: body_bytes.clone(),
            };
            debug!(method = %method, url = %url, "sending request");
            let raw = self.transport.send(request).await?;

            if raw.status == 502 && attempt < self.gateway_retry_limit {
                attempt += 1;
                warn!(
                    attempt,
                    limit = self.gateway_retry_limit,
                    "bad gateway response, retrying"
                );
                tokio::time::sleep(self.gateway_retry_delay).await;
                continue;
            }

            return Ok(KineticResponse::from_raw(raw));
        }
    }

    fn build_url(&self, path: &str, params: &[(String, String)]) -> String {
        let mut url = format!("{}/{}", self.api_url, path.trim_start_matches('/'));
        if !params.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish();
            url.push('?');
            url.push_str(&query);
        }
        url
    }

    fn default_headers(&self, has_body: bool) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), self.basic_auth());
        headers.insert("Accept".to_string(), "application/json".to_string());
        if has_body {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        headers
    }

    fn basic_auth(&self) -> String {
        let credentials = format!("{}:{}", self.username, self.password.expose_secret());
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        )
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_url", &self.api_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::mocks::MockTransport;

    fn test_client(transport: Arc<MockTransport>) -> ApiClient {
        let config = KineticConfig::builder()
            .server("https://kinetic.example.com")
            .username("admin")
            .password("secret")
            .gateway_retry_delay(0.0)
            .build()
            .unwrap();
        ApiClient::new(
            transport,
            "https://kinetic.example.com/app/api/v1".to_string(),
            &config,
        )
    }

    #[test]
    fn encode_segment_escapes_reserved_characters() {
        assert_eq!(encode_segment("john smith"), "john%20smith");
        assert_eq!(encode_segment("a/b"), "a%2Fb");
        assert_eq!(encode_segment("name@host"), "name%40host");
        assert_eq!(encode_segment("plain-slug_1.0~x"), "plain-slug_1.0~x");
    }

    #[test]
    fn build_url_joins_root_and_path() {
        let client = test_client(Arc::new(MockTransport::new()));

        let url = client.build_url("/spaces/acme", &[]);

        assert_eq!(url, "https://kinetic.example.com/app/api/v1/spaces/acme");
    }

    #[test]
    fn build_url_preserves_repeated_query_keys_in_order() {
        let client = test_client(Arc::new(MockTransport::new()));
        let params = vec![
            ("include".to_string(), "details".to_string()),
            ("include".to_string(), "fields".to_string()),
            ("limit".to_string(), "25".to_string()),
        ];

        let url = client.build_url("/kapps/services/forms", &params);

        assert_eq!(
            url,
            "https://kinetic.example.com/app/api/v1/kapps/services/forms?include=details&include=fields&limit=25"
        );
    }

    #[test]
    fn requests_carry_basic_auth_and_accept_headers() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_json(200, "{}");
        let client = test_client(transport.clone());

        tokio_test::block_on(client.get("/version", &[])).unwrap();

        let request = transport.last_request().unwrap();
        let encoded = base64::engine::general_purpose::STANDARD.encode("admin:secret");
        assert_eq!(
            request.headers.get("Authorization"),
            Some(&format!("Basic {encoded}"))
        );
        assert_eq!(
            request.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
        assert!(!request.headers.contains_key("Content-Type"));
    }

    #[test]
    fn bodies_are_serialized_and_set_the_content_type_header() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_json(200, "{}");
        let client = test_client(transport.clone());

        tokio_test::block_on(client.post("/spaces", &json!({ "name": "Acme" }))).unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        let body: serde_json::Value =
            serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
        assert_eq!(body, json!({ "name": "Acme" }));
    }

    #[test]
    fn extra_headers_override_defaults() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_json(200, "{}");
        let client = test_client(transport.clone());
        let mut extra = HashMap::new();
        extra.insert("Accept".to_string(), "application/xml".to_string());

        tokio_test::block_on(client.request::<()>(
            HttpMethod::Get,
            "/version",
            &[],
            None,
            Some(extra),
        ))
        .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(
            request.headers.get("Accept").map(String::as_str),
            Some("application/xml")
        );
    }

    #[tokio::test]
    async fn bad_gateway_responses_are_retried_until_success() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_json(502, "");
        transport.enqueue_json(502, "");
        transport.enqueue_json(200, r#"{"ok":true}"#);
        let client = test_client(transport.clone());

        let response = client.get("/version", &[]).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(transport.request_count(), 3);
    }

    #[tokio::test]
    async fn bad_gateway_responses_exhaust_the_retry_limit() {
        let transport = Arc::new(MockTransport::new());
        for _ in 0..6 {
            transport.enqueue_json(502, "");
        }
        let client = test_client(transport.clone());

        let response = client.get("/version", &[]).await.unwrap();

        // Initial attempt plus the five configured retries.
        assert_eq!(response.status(), 502);
        assert_eq!(transport.request_count(), 6);
    }
}
