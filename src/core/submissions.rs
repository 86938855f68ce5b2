//! Submission operations.

use tracing::info;

use crate::errors::KineticResult;
use crate::http::{encode_segment, ApiClient, HttpMethod, KineticResponse};
use crate::pagination::fetch_all_pages;
use crate::payloads::SubmissionPayload;

/// Service for submission operations.
pub struct SubmissionsService<'a> {
    api: &'a ApiClient,
}

impl<'a> SubmissionsService<'a> {
    /// Creates a new submissions service.
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Creates a submission for a form.
    pub async fn add_submission(
        &self,
        kapp_slug: &str,
        form_slug: &str,
        payload: &SubmissionPayload,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api
            .post_with_params(
                &self.form_submissions_path(kapp_slug, form_slug),
                params,
                payload,
            )
            .await
    }

    /// Creates a submission for a named page of a form.
    pub async fn add_submission_page(
        &self,
        kapp_slug: &str,
        form_slug: &str,
        page_name: &str,
        payload: &SubmissionPayload,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        let mut params = params.to_vec();
        params.push(("page".to_string(), page_name.to_string()));
        self.add_submission(kapp_slug, form_slug, payload, &params)
            .await
    }

    /// Creates a draft submission for a form, merging the payload into the
    /// new submission.
    pub async fn patch_new_submission(
        &self,
        kapp_slug: &str,
        form_slug: &str,
        payload: &SubmissionPayload,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api
            .request(
                HttpMethod::Patch,
                &self.form_submissions_path(kapp_slug, form_slug),
                params,
                Some(payload),
                None,
            )
            .await
    }

    /// Merges the payload into an existing submission.
    pub async fn patch_existing_submission(
        &self,
        submission_id: &str,
        payload: &SubmissionPayload,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        self.api
            .request(
                HttpMethod::Patch,
                &format!("/submissions/{}", encode_segment(submission_id)),
                params,
                Some(payload),
                None,
            )
            .await
    }

    /// Retrieves one page of submissions for a form.
    pub async fn find_form_submissions(
        &self,
        kapp_slug: &str,
        form_slug: &str,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        match params.iter().find(|(key, _)| key == "pageToken") {
            Some((_, token)) => {
                info!(form = form_slug, token = %token, "finding paginated form submissions");
            }
            None => info!(form = form_slug, "finding form submissions"),
        }
        self.api
            .get(&self.form_submissions_path(kapp_slug, form_slug), params)
            .await
    }

    /// Retrieves every submission for a form, following continuation tokens
    /// until the last page.
    ///
    /// The entire result set is buffered in memory, so this is unsuitable for
    /// very large forms.
    pub async fn find_all_form_submissions(
        &self,
        kapp_slug: &str,
        form_slug: &str,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        fetch_all_pages("submissions", params.to_vec(), |page_params| async move {
            self.find_form_submissions(kapp_slug, form_slug, &page_params)
                .await
        })
        .await
    }

    /// Retrieves one page of submissions for a kapp.
    pub async fn find_kapp_submissions(
        &self,
        kapp_slug: &str,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        match params.iter().find(|(key, _)| key == "pageToken") {
            Some((_, token)) => {
                info!(kapp = kapp_slug, token = %token, "finding paginated kapp submissions");
            }
            None => info!(kapp = kapp_slug, "finding kapp submissions"),
        }
        self.api
            .get(
                &format!("/kapps/{}/submissions", encode_segment(kapp_slug)),
                params,
            )
            .await
    }

    /// Retrieves every submission for a kapp, following continuation tokens
    /// until the last page.
    ///
    /// The entire result set is buffered in memory, so this is unsuitable for
    /// very large kapps.
    pub async fn find_all_kapp_submissions(
        &self,
        kapp_slug: &str,
        params: &[(String, String)],
    ) -> KineticResult<KineticResponse> {
        fetch_all_pages("submissions", params.to_vec(), |page_params| async move {
            self.find_kapp_submissions(kapp_slug, &page_params).await
        })
        .await
    }

    /// Replaces an existing submission.
    pub async fn update_submission(
        &self,
        submission_id: &str,
        payload: &SubmissionPayload,
    ) -> KineticResult<KineticResponse> {
        self.api
            .put(
                &format!("/submissions/{}", encode_segment(submission_id)),
                payload,
            )
            .await
    }

    fn form_submissions_path(&self, kapp_slug: &str, form_slug: &str) -> String {
        format!(
            "/kapps/{}/forms/{}/submissions",
            encode_segment(kapp_slug),
            encode_segment(form_slug)
        )
    }
}
