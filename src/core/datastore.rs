//! Datastore form operations.

use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::errors::KineticResult;
use crate::http::{encode_segment, ApiClient, KineticResponse};

/// Service for datastore form operations.
pub struct DatastoreFormsService<'a> {
    api: &'a ApiClient,
}

impl<'a> DatastoreFormsService<'a> {
    /// Creates a new datastore forms service.
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Creates a datastore form.
    pub async fn add_form<B: Serialize>(&self, body: &B) -> KineticResult<KineticResponse> {
        self.api.post("/datastore/forms", body).await
    }

    /// Deletes a datastore form.
    pub async fn delete_form(&self, form_slug: &str) -> KineticResult<KineticResponse> {
        self.api
            .delete(&format!("/datastore/forms/{}", encode_segment(form_slug)))
            .await
    }

    /// Retrieves all datastore forms.
    pub async fn find_forms(&self, params: &[(String, String)]) -> KineticResult<KineticResponse> {
        self.api.get("/datastore/forms", params).await
    }

    /// Retrieves a single datastore form.
    pub async fn find_form(
        &self,
        form_slug: &str,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api
            .get(
                &format!("/datastore/forms/{}", encode_segment(form_slug)),
                params,
            )
            .await
    }

    /// Retrieves the export representation of a datastore form, broadening
    /// the query to include every nested definition.
    pub async fn export_form(&self, form_slug: &str) -> KineticResult<KineticResponse> {
        let params = vec![("export".to_string(), "true".to_string())];
        self.find_form(form_slug, &params).await
    }

    /// Updates a datastore form with the given resource body.
    pub async fn update_form<B: Serialize>(
        &self,
        form_slug: &str,
        body: &B,
    ) -> KineticResult<KineticResponse> {
        self.api
            .put(
                &format!("/datastore/forms/{}", encode_segment(form_slug)),
                body,
            )
            .await
    }

    /// Starts a background job that rebuilds the form's indexes.
    pub async fn build_indexes<I: Serialize>(
        &self,
        form_slug: &str,
        indexes: &I,
    ) -> KineticResult<KineticResponse> {
        info!(form = form_slug, "building datastore form indexes");
        let body = json!({
            "type": "Datastore Indexing",
            "content": { "indexes": indexes },
        });
        self.api
            .post(
                &format!("/datastore/forms/{}/backgroundJobs", encode_segment(form_slug)),
                &body,
            )
            .await
    }
}
