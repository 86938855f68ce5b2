//! Platform metadata operations.

use crate::errors::KineticResult;
use crate::http::{ApiClient, KineticResponse};

/// Service for platform metadata.
pub struct MetaService<'a> {
    api: &'a ApiClient,
}

impl<'a> MetaService<'a> {
    /// Creates a new metadata service.
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Retrieves the application version.
    pub async fn app_version(&self) -> KineticResult<KineticResponse> {
        self.api.get("/version", &[]).await
    }

    /// Retrieves the currently running background jobs.
    pub async fn find_background_jobs(
        &self,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api.get("/backgroundJobs", params).await
    }
}
