//! Client for the Discussions messaging API.

mod discussions;
mod invitations;
mod messages;
mod participants;

use std::sync::Arc;

use crate::config::KineticConfig;
use crate::errors::KineticResult;
use crate::http::{ApiClient, HttpTransport, ReqwestTransport};

pub use discussions::DiscussionsService;
pub use invitations::InvitationsService;
pub use messages::MessagesService;
pub use participants::ParticipantsService;

/// Client for the Discussions API, rooted at
/// `{server}/app/discussions/api/v1`.
///
/// Cloning is cheap: clones share the underlying transport.
#[derive(Debug, Clone)]
pub struct DiscussionsClient {
    api: ApiClient,
}

impl DiscussionsClient {
    /// Creates a client that connects to the configured server.
    pub fn new(config: &KineticConfig) -> KineticResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config.options)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Creates a client over a caller-supplied transport.
    pub fn with_transport(config: &KineticConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let api = ApiClient::new(
            transport,
            format!("{}/app/discussions/api/v1", config.server),
            config,
        );
        Self { api }
    }

    /// The shared request surface, for endpoints not covered by a service.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Discussion operations.
    pub fn discussions(&self) -> DiscussionsService<'_> {
        DiscussionsService::new(&self.api)
    }

    /// Message operations.
    pub fn messages(&self) -> MessagesService<'_> {
        MessagesService::new(&self.api)
    }

    /// Invitation operations.
    pub fn invitations(&self) -> InvitationsService<'_> {
        InvitationsService::new(&self.api)
    }

    /// Participant operations.
    pub fn participants(&self) -> ParticipantsService<'_> {
        ParticipantsService::new(&self.api)
    }
}
