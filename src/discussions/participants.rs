//! Participant operations.

use serde_json::json;

use crate::errors::KineticResult;
use crate::http::{encode_segment, ApiClient, KineticResponse};

/// Service for participant operations within a discussion.
pub struct ParticipantsService<'a> {
    api: &'a ApiClient,
}

impl<'a> ParticipantsService<'a> {
    /// Creates a new participants service.
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Adds a user to a discussion.
    pub async fn add_participant(
        &self,
        discussion_id: &str,
        username: &str,
    ) -> KineticResult<KineticResponse> {
        self.api
            .post(
                &format!("/discussions/{}/participants", encode_segment(discussion_id)),
                &json!({ "username": username }),
            )
            .await
    }

    /// Removes a user from a discussion.
    pub async fn delete_participant(
        &self,
        discussion_id: &str,
        username: &str,
    ) -> KineticResult<KineticResponse> {
        self.api
            .delete(&format!(
                "/discussions/{}/participants/{}",
                encode_segment(discussion_id),
                encode_segment(username)
            ))
            .await
    }

    /// Retrieves the participants of a discussion.
    pub async fn find_participants(
        &self,
        discussion_id: &str,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api
            .get(
                &format!("/discussions/{}/participants", encode_segment(discussion_id)),
                params,
            )
            .await
    }
}
