//! Client for the Core API: spaces, forms, datastore forms and submissions.

mod datastore;
mod forms;
mod meta;
mod spaces;
mod submissions;

use std::sync::Arc;

use crate::config::KineticConfig;
use crate::errors::KineticResult;
use crate::http::{ApiClient, HttpTransport, ReqwestTransport};

pub use datastore::DatastoreFormsService;
pub use forms::FormsService;
pub use meta::MetaService;
pub use spaces::SpacesService;
pub use submissions::SubmissionsService;

/// Client for the Core platform API, rooted at `{server}/app/api/v1`.
///
/// Cloning is cheap: clones share the underlying transport.
#[derive(Debug, Clone)]
pub struct CoreClient {
    api: ApiClient,
}

impl CoreClient {
    /// Creates a client that connects to the configured server.
    pub fn new(config: &KineticConfig) -> KineticResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config.options)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Creates a client over a caller-supplied transport.
    pub fn with_transport(config: &KineticConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let api = ApiClient::new(transport, format!("{}/app/api/v1", config.server), config);
        Self { api }
    }

    /// The shared request surface, for endpoints not covered by a service.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Space operations.
    pub fn spaces(&self) -> SpacesService<'_> {
        SpacesService::new(&self.api)
    }

    /// Platform metadata operations.
    pub fn meta(&self) -> MetaService<'_> {
        MetaService::new(&self.api)
    }

    /// Kapp form operations.
    pub fn forms(&self) -> FormsService<'_> {
        FormsService::new(&self.api)
    }

    /// Datastore form operations.
    pub fn datastore_forms(&self) -> DatastoreFormsService<'_> {
        DatastoreFormsService::new(&self.api)
    }

    /// Submission operations.
    pub fn submissions(&self) -> SubmissionsService<'_> {
        SubmissionsService::new(&self.api)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::KineticConfig;
    use crate::mocks::MockTransport;

    fn config() -> KineticConfig {
        KineticConfig::builder()
            .server("https://space.example.com")
            .username("admin")
            .password("secret")
            .build()
            .unwrap()
    }

    #[test]
    fn the_api_root_is_appended_to_the_server_url() {
        let client = CoreClient::with_transport(&config(), Arc::new(MockTransport::new()));

        assert_eq!(client.api().api_url(), "https://space.example.com/app/api/v1");
    }

    #[test]
    fn clones_share_the_recording_transport() {
        let transport = Arc::new(MockTransport::new());
        let client = CoreClient::with_transport(&config(), transport.clone());
        let cloned = client.clone();

        assert_eq!(client.api().api_url(), cloned.api().api_url());
        assert_eq!(transport.request_count(), 0);
    }
}
