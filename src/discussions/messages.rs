//! Message operations.

use crate::errors::KineticResult;
use crate::http::{encode_segment, ApiClient, KineticResponse};
use crate::payloads::MessagePayload;

/// Service for message operations within a discussion.
pub struct MessagesService<'a> {
    api: &'a ApiClient,
}

impl<'a> MessagesService<'a> {
    /// Creates a new messages service.
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Posts a message to a discussion.
    ///
    /// A plain string is accepted as shorthand for a single text content
    /// entry.
    pub async fn add_message(
        &self,
        discussion_id: &str,
        message: impl Into<MessagePayload>,
    ) -> KineticResult<KineticResponse> {
        let message = message.into();
        self.api
            .post(
                &format!("/discussions/{}/messages", encode_segment(discussion_id)),
                &message,
            )
            .await
    }

    /// Replaces the content of a message.
    ///
    /// A plain string is accepted as shorthand for a single text content
    /// entry.
    pub async fn update_message(
        &self,
        discussion_id: &str,
        message_id: &str,
        message: impl Into<MessagePayload>,
    ) -> KineticResult<KineticResponse> {
        let message = message.into();
        self.api
            .put(&self.message_path(discussion_id, message_id), &message)
            .await
    }

    /// Retrieves one page of messages in a discussion.
    pub async fn find_messages(
        &self,
        discussion_id: &str,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api
            .get(
                &format!("/discussions/{}/messages", encode_segment(discussion_id)),
                params,
            )
            .await
    }

    /// Retrieves a single message.
    pub async fn find_message(
        &self,
        discussion_id: &str,
        message_id: &str,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api
            .get(&self.message_path(discussion_id, message_id), params)
            .await
    }

    fn message_path(&self, discussion_id: &str, message_id: &str) -> String {
        format!(
            "/discussions/{}/messages/{}",
            encode_segment(discussion_id),
            encode_segment(message_id)
        )
    }
}
