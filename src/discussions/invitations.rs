//! Invitation operations.

use serde_json::json;

use crate::errors::KineticResult;
use crate::http::{encode_segment, ApiClient, KineticResponse};
use crate::payloads::InvitationPayload;

/// Service for invitation operations within a discussion.
pub struct InvitationsService<'a> {
    api: &'a ApiClient,
}

impl<'a> InvitationsService<'a> {
    /// Creates a new invitations service.
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Invites someone to a discussion, by email address or by username
    /// depending on how the payload was built.
    pub async fn add_invitation(
        &self,
        discussion_id: &str,
        invitation: &InvitationPayload,
    ) -> KineticResult<KineticResponse> {
        self.api
            .post(
                &format!("/discussions/{}/invitations", encode_segment(discussion_id)),
                invitation,
            )
            .await
    }

    /// Resends the invitation previously sent to an email address.
    pub async fn resend_invitation(
        &self,
        discussion_id: &str,
        email: &str,
    ) -> KineticResult<KineticResponse> {
        self.api
            .put(&self.invitation_path(discussion_id, email), &json!({}))
            .await
    }

    /// Withdraws the invitation previously sent to an email address.
    pub async fn delete_invitation(
        &self,
        discussion_id: &str,
        email: &str,
    ) -> KineticResult<KineticResponse> {
        self.api
            .delete(&self.invitation_path(discussion_id, email))
            .await
    }

    /// Retrieves the open invitations of a discussion.
    pub async fn find_invitations(
        &self,
        discussion_id: &str,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api
            .get(
                &format!("/discussions/{}/invitations", encode_segment(discussion_id)),
                params,
            )
            .await
    }

    fn invitation_path(&self, discussion_id: &str, email: &str) -> String {
        format!(
            "/discussions/{}/invitations/{}",
            encode_segment(discussion_id),
            encode_segment(email)
        )
    }
}
