//! Client for the Bridgehub management API.

mod bridges;

use std::sync::Arc;

use crate::config::KineticConfig;
use crate::errors::KineticResult;
use crate::http::{ApiClient, HttpTransport, ReqwestTransport};

pub use bridges::BridgesService;

/// Client for the Bridgehub management API, rooted at
/// `{server}/app/manage-api/v1`.
///
/// Cloning is cheap: clones share the underlying transport.
#[derive(Debug, Clone)]
pub struct BridgehubClient {
    api: ApiClient,
}

impl BridgehubClient {
    /// Creates a client that connects to the configured bridgehub server.
    pub fn new(config: &KineticConfig) -> KineticResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config.options)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Creates a client over a caller-supplied transport.
    pub fn with_transport(config: &KineticConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let api = ApiClient::new(
            transport,
            format!("{}/app/manage-api/v1", config.server),
            config,
        );
        Self { api }
    }

    /// The shared request surface, for endpoints not covered by a service.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Bridge operations.
    pub fn bridges(&self) -> BridgesService<'_> {
        BridgesService::new(&self.api)
    }
}
