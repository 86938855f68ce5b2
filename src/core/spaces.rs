//! Space operations.

use serde::Serialize;
use serde_json::json;

use crate::errors::KineticResult;
use crate::http::{encode_segment, ApiClient, KineticResponse};

/// Service for space operations.
pub struct SpacesService<'a> {
    api: &'a ApiClient,
}

impl<'a> SpacesService<'a> {
    /// Creates a new spaces service.
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Creates a space with the given display name and slug.
    pub async fn add_space(&self, name: &str, slug: &str) -> KineticResult<KineticResponse> {
        self.api
            .post("/spaces", &json!({ "name": name, "slug": slug }))
            .await
    }

    /// Deletes a space.
    pub async fn delete_space(&self, slug: &str) -> KineticResult<KineticResponse> {
        self.api
            .delete(&format!("/spaces/{}", encode_segment(slug)))
            .await
    }

    /// Retrieves all spaces.
    pub async fn find_spaces(&self, params: &[(String, String)]) -> KineticResult<KineticResponse> {
        self.api.get("/spaces", params).await
    }

    /// Retrieves a single space.
    pub async fn find_space(
        &self,
        slug: &str,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api
            .get(&format!("/spaces/{}", encode_segment(slug)), params)
            .await
    }

    /// Updates a space with the given resource body.
    pub async fn update_space<B: Serialize>(
        &self,
        slug: &str,
        body: &B,
    ) -> KineticResult<KineticResponse> {
        self.api
            .put(&format!("/spaces/{}", encode_segment(slug)), body)
            .await
    }

    /// Resets the licensed user count across the system.
    pub async fn reset_license_count(&self) -> KineticResult<KineticResponse> {
        self.api.put("/license/reset", &json!({})).await
    }

    /// Retrieves a user within a specific space.
    pub async fn find_space_user(
        &self,
        space_slug: &str,
        username: &str,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api
            .get(
                &format!(
                    "/spaces/{}/users/{}",
                    encode_segment(space_slug),
                    encode_segment(username)
                ),
                params,
            )
            .await
    }
}
