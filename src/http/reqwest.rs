//! Reqwest-based HTTP transport implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::redirect;
use reqwest::Client;

use super::transport::{HttpMethod, HttpRequest, HttpTransport, RawResponse, TransportError};
use crate::config::{SdkOptions, SslVerifyMode};

/// Reqwest-based HTTP transport.
///
/// Redirects are followed up to the configured maximum; exceeding the limit
/// is a fatal [`TransportError::Request`]. TLS verification honors
/// [`SslVerifyMode`] and the optional CA trust-anchor file.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport from the shared SDK options.
    pub fn new(options: &SdkOptions) -> Result<Self, TransportError> {
        let mut builder =
            Client::builder().redirect(redirect::Policy::limited(options.max_redirects as usize));

        if options.ssl_verify_mode == SslVerifyMode::None {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ca_file) = &options.ssl_ca_file {
            let pem = std::fs::read(ca_file).map_err(|e| {
                TransportError::Connection(format!(
                    "failed to read CA file {}: {e}",
                    ca_file.display()
                ))
            })?;
            let certificate = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                TransportError::Connection(format!(
                    "invalid CA certificate {}: {e}",
                    ca_file.display()
                ))
            })?;
            builder = builder.add_root_certificate(certificate);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Connection(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Converts an [`HttpMethod`] to a `reqwest::Method`.
    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// Converts a header map to a `reqwest::header::HeaderMap`, skipping
    /// entries that are not valid header names or values.
    fn convert_headers(headers: &HashMap<String, String>) -> reqwest::header::HeaderMap {
        let mut header_map = reqwest::header::HeaderMap::new();
        for (key, value) in headers {
            if let (Ok(name), Ok(val)) = (
                reqwest::header::HeaderName::from_bytes(key.as_bytes()),
                reqwest::header::HeaderValue::from_str(value),
            ) {
                header_map.insert(name, val);
            }
        }
        header_map
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
        let method = Self::convert_method(request.method);
        let headers = Self::convert_headers(&request.headers);

        let mut req_builder = self.client.request(method, &request.url).headers(headers);

        if let Some(body) = request.body {
            req_builder = req_builder.body(body.to_vec());
        }

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else if e.is_redirect() {
                TransportError::Request(format!("redirect limit exceeded: {e}"))
            } else {
                TransportError::Connection(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let message = response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Request(format!("failed to read response body: {e}")))?;

        Ok(RawResponse {
            status,
            message,
            body,
        })
    }
}
