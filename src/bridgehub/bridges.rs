//! Bridge operations.

use serde::Serialize;

use crate::errors::KineticResult;
use crate::http::{encode_segment, ApiClient, KineticResponse};

/// Service for bridge operations.
pub struct BridgesService<'a> {
    api: &'a ApiClient,
}

impl<'a> BridgesService<'a> {
    /// Creates a new bridges service.
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Registers a bridge.
    pub async fn add_bridge<B: Serialize>(&self, body: &B) -> KineticResult<KineticResponse> {
        self.api.post("/bridges", body).await
    }

    /// Deletes a bridge.
    pub async fn delete_bridge(&self, slug: &str) -> KineticResult<KineticResponse> {
        self.api
            .delete(&format!("/bridges/{}", encode_segment(slug)))
            .await
    }

    /// Retrieves all bridges.
    pub async fn find_bridges(
        &self,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api.get("/bridges", params).await
    }

    /// Retrieves a single bridge.
    pub async fn find_bridge(
        &self,
        slug: &str,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api
            .get(&format!("/bridges/{}", encode_segment(slug)), params)
            .await
    }

    /// Updates a bridge with the given resource body.
    pub async fn update_bridge<B: Serialize>(
        &self,
        slug: &str,
        body: &B,
    ) -> KineticResult<KineticResponse> {
        self.api
            .put(&format!("/bridges/{}", encode_segment(slug)), body)
            .await
    }
}
