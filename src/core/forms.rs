//! Kapp form operations.

use serde::Serialize;

use crate::errors::KineticResult;
use crate::http::{encode_segment, ApiClient, KineticResponse};

/// Service for form operations within a kapp.
pub struct FormsService<'a> {
    api: &'a ApiClient,
}

impl<'a> FormsService<'a> {
    /// Creates a new forms service.
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Creates a form in the given kapp.
    pub async fn add_form<B: Serialize>(
        &self,
        kapp_slug: &str,
        body: &B,
    ) -> KineticResult<KineticResponse> {
        self.api
            .post(&format!("/kapps/{}/forms", encode_segment(kapp_slug)), body)
            .await
    }

    /// Deletes a form.
    pub async fn delete_form(
        &self,
        kapp_slug: &str,
        form_slug: &str,
    ) -> KineticResult<KineticResponse> {
        self.api
            .delete(&format!(
                "/kapps/{}/forms/{}",
                encode_segment(kapp_slug),
                encode_segment(form_slug)
            ))
            .await
    }

    /// Retrieves all forms in the given kapp.
    pub async fn find_forms(
        &self,
        kapp_slug: &str,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api
            .get(&format!("/kapps/{}/forms", encode_segment(kapp_slug)), params)
            .await
    }

    /// Retrieves a single form.
    pub async fn find_form(
        &self,
        kapp_slug: &str,
        form_slug: &str,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api
            .get(
                &format!(
                    "/kapps/{}/forms/{}",
                    encode_segment(kapp_slug),
                    encode_segment(form_slug)
                ),
                params,
            )
            .await
    }

    /// Updates a form with the given resource body.
    pub async fn update_form<B: Serialize>(
        &self,
        kapp_slug: &str,
        form_slug: &str,
        body: &B,
    ) -> KineticResult<KineticResponse> {
        self.api
            .put(
                &format!(
                    "/kapps/{}/forms/{}",
                    encode_segment(kapp_slug),
                    encode_segment(form_slug)
                ),
                body,
            )
            .await
    }
}
