//! Discussion operations.

use crate::errors::KineticResult;
use crate::http::{encode_segment, ApiClient, KineticResponse};
use crate::payloads::DiscussionPayload;

/// Service for discussion operations.
pub struct DiscussionsService<'a> {
    api: &'a ApiClient,
}

impl<'a> DiscussionsService<'a> {
    /// Creates a new discussions service.
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Creates a discussion.
    ///
    /// A plain string is accepted as shorthand for a payload carrying only
    /// the title.
    pub async fn add_discussion(
        &self,
        payload: impl Into<DiscussionPayload>,
    ) -> KineticResult<KineticResponse> {
        let payload = payload.into();
        self.api.post("/discussions", &payload).await
    }

    /// Updates a discussion.
    pub async fn update_discussion(
        &self,
        discussion_id: &str,
        payload: &DiscussionPayload,
    ) -> KineticResult<KineticResponse> {
        self.api
            .put(
                &format!("/discussions/{}", encode_segment(discussion_id)),
                payload,
            )
            .await
    }

    /// Deletes a discussion.
    pub async fn delete_discussion(&self, discussion_id: &str) -> KineticResult<KineticResponse> {
        self.api
            .delete(&format!("/discussions/{}", encode_segment(discussion_id)))
            .await
    }

    /// Retrieves one page of discussions.
    pub async fn find_discussions(
        &self,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api.get("/discussions", params).await
    }

    /// Retrieves a single discussion.
    pub async fn find_discussion(
        &self,
        discussion_id: &str,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api
            .get(
                &format!("/discussions/{}", encode_segment(discussion_id)),
                params,
            )
            .await
    }
}
