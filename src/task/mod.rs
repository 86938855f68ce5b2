//! Client for the Task engine API: engine errors, users and policy rules.

mod errors;
mod policy_rules;
mod users;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::KineticConfig;
use crate::errors::KineticResult;
use crate::http::{ApiClient, HttpTransport, KineticResponse, ReqwestTransport};

pub use errors::{ErrorsService, ResolutionAction};
pub use policy_rules::PolicyRulesService;
pub use users::UsersService;

/// Client for the Task engine API, rooted at `{server}/app/api/v1`.
///
/// The server here is the task server, e.g.
/// `https://space.example.com/kinetic-task`. Cloning is cheap: clones share
/// the underlying transport.
#[derive(Debug, Clone)]
pub struct TaskClient {
    api: ApiClient,
    export_directory: Option<PathBuf>,
}

impl TaskClient {
    /// Creates a client that connects to the configured task server.
    pub fn new(config: &KineticConfig) -> KineticResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config.options)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Creates a client over a caller-supplied transport.
    pub fn with_transport(config: &KineticConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let api = ApiClient::new(transport, format!("{}/app/api/v1", config.server), config);
        Self {
            api,
            export_directory: config.options.export_directory.clone(),
        }
    }

    /// The shared request surface, for endpoints not covered by a service.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The directory resources are exported to, when one is configured.
    pub fn export_directory(&self) -> Option<&Path> {
        self.export_directory.as_deref()
    }

    /// Retrieves the task engine environment information.
    pub async fn environment(
        &self,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api.get("/environment", params).await
    }

    /// Engine error operations.
    pub fn errors(&self) -> ErrorsService<'_> {
        ErrorsService::new(&self.api)
    }

    /// Task user operations.
    pub fn users(&self) -> UsersService<'_> {
        UsersService::new(&self.api)
    }

    /// Policy rule operations.
    pub fn policy_rules(&self) -> PolicyRulesService<'_> {
        PolicyRulesService::new(&self.api, self.export_directory.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::mocks::MockTransport;

    #[test]
    fn the_export_directory_comes_from_the_configured_options() {
        let config = KineticConfig::builder()
            .server("https://space.example.com/kinetic-task")
            .username("admin")
            .password("secret")
            .export_directory("/tmp/task-exports")
            .build()
            .unwrap();

        let client = TaskClient::with_transport(&config, Arc::new(MockTransport::new()));

        assert_eq!(
            client.export_directory(),
            Some(Path::new("/tmp/task-exports"))
        );
        assert_eq!(
            client.api().api_url(),
            "https://space.example.com/kinetic-task/app/api/v1"
        );
    }
}
