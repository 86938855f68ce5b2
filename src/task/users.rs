//! Task user operations.
//!
//! Every method takes an [`ErrorMode`] deciding whether a non-200 response is
//! returned for inspection or converted into a fatal error.

use serde::Serialize;
use tracing::info;

use crate::errors::{ErrorMode, KineticResult};
use crate::http::{encode_segment, ApiClient, KineticResponse};

/// Service for task user operations.
pub struct UsersService<'a> {
    api: &'a ApiClient,
}

impl<'a> UsersService<'a> {
    /// Creates a new task users service.
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Creates a task user.
    pub async fn add_user<B: Serialize>(
        &self,
        body: &B,
        mode: ErrorMode,
    ) -> KineticResult<KineticResponse> {
        let response = self.api.post("/users", body).await?;
        mode.check(response)
    }

    /// Deletes a task user.
    pub async fn delete_user(
        &self,
        login_id: &str,
        mode: ErrorMode,
    ) -> KineticResult<KineticResponse> {
        let response = self
            .api
            .delete(&format!("/users/{}", encode_segment(login_id)))
            .await?;
        mode.check(response)
    }

    /// Deletes every task user, one delete call per listed user.
    ///
    /// Deletions run sequentially in listing order. Under strict mode a
    /// failed deletion stops the loop immediately, leaving the remaining
    /// users in place.
    pub async fn delete_users(&self, mode: ErrorMode) -> KineticResult<Vec<KineticResponse>> {
        info!("deleting all task users");
        let list = self.find_users(&[], mode).await?;
        let users = list.content()["users"].as_array().cloned().unwrap_or_default();

        let mut responses = Vec::with_capacity(users.len());
        for user in &users {
            if let Some(login_id) = user["loginId"].as_str() {
                responses.push(self.delete_user(login_id, mode).await?);
            }
        }
        Ok(responses)
    }

    /// Retrieves task users matching the given parameters.
    pub async fn find_users(
        &self,
        params: &[(String, String)],
        mode: ErrorMode,
    ) -> KineticResult<KineticResponse> {
        let response = self.api.get("/users", params).await?;
        mode.check(response)
    }

    /// Updates a task user.
    pub async fn update_user<B: Serialize>(
        &self,
        login_id: &str,
        body: &B,
        mode: ErrorMode,
    ) -> KineticResult<KineticResponse> {
        let response = self
            .api
            .put(&format!("/users/{}", encode_segment(login_id)), body)
            .await?;
        mode.check(response)
    }
}
