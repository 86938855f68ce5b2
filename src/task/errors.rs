//! Engine error operations.
//!
//! Every method takes an [`ErrorMode`] deciding whether a non-200 response is
//! returned for inspection or converted into a fatal error.

use std::fmt;

use serde_json::json;

use crate::errors::{ErrorMode, KineticResult};
use crate::http::{ApiClient, KineticResponse};

/// Action applied to the interrupted run when resolving an engine error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionAction {
    /// Cancels the branch the errored node belongs to.
    CancelBranch,
    /// Continues the branch past the errored node.
    ContinueBranch,
    /// Marks the error resolved without touching the run.
    DoNothing,
    /// Retries the errored operation.
    Retry,
    /// Retries the errored task node.
    RetryTask,
    /// Skips the errored task node.
    SkipTask,
}

impl ResolutionAction {
    /// The wire name of the action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CancelBranch => "Cancel Branch",
            Self::ContinueBranch => "Continue Branch",
            Self::DoNothing => "Do Nothing",
            Self::Retry => "Retry",
            Self::RetryTask => "Retry Task",
            Self::SkipTask => "Skip Task",
        }
    }
}

impl fmt::Display for ResolutionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service for engine error operations.
pub struct ErrorsService<'a> {
    api: &'a ApiClient,
}

impl<'a> ErrorsService<'a> {
    /// Creates a new engine errors service.
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Deletes an engine error.
    pub async fn delete_error(&self, id: u64, mode: ErrorMode) -> KineticResult<KineticResponse> {
        let response = self.api.delete(&format!("/errors/{id}")).await?;
        mode.check(response)
    }

    /// Resolves a set of engine errors with one action and resolution note.
    pub async fn resolve_errors(
        &self,
        ids: &[u64],
        action: ResolutionAction,
        resolution: &str,
        mode: ErrorMode,
    ) -> KineticResult<KineticResponse> {
        let body = json!({
            "ids": ids,
            "action": action.as_str(),
            "resolution": resolution,
        });
        let response = self.api.post("/errors/resolve", &body).await?;
        mode.check(response)
    }

    /// Retrieves engine errors matching the given parameters.
    pub async fn find_errors(
        &self,
        params: &[(String, String)],
        mode: ErrorMode,
    ) -> KineticResult<KineticResponse> {
        let response = self.api.get("/errors", params).await?;
        mode.check(response)
    }

    /// Retrieves a single engine error.
    pub async fn find_error(
        &self,
        id: u64,
        params: &[(String, String)],
        mode: ErrorMode,
    ) -> KineticResult<KineticResponse> {
        let response = self.api.get(&format!("/errors/{id}"), params).await?;
        mode.check(response)
    }

    /// Retrieves the active errors raised by a handler.
    pub async fn find_active_errors_by_handler(
        &self,
        handler_id: &str,
        params: &[(String, String)],
        mode: ErrorMode,
    ) -> KineticResult<KineticResponse> {
        let params = with_params(
            params,
            &[("handlerId", handler_id), ("status", "Active")],
        );
        self.find_errors(&params, mode).await
    }

    /// Retrieves the active errors raised under a source.
    pub async fn find_active_errors_by_source(
        &self,
        source: &str,
        params: &[(String, String)],
        mode: ErrorMode,
    ) -> KineticResult<KineticResponse> {
        let params = with_params(params, &[("source", source), ("status", "Active")]);
        self.find_errors(&params, mode).await
    }

    /// Retrieves the active errors raised under a source group.
    pub async fn find_active_errors_by_source_group(
        &self,
        source: &str,
        group: &str,
        params: &[(String, String)],
        mode: ErrorMode,
    ) -> KineticResult<KineticResponse> {
        let params = with_params(
            params,
            &[("source", source), ("group", group), ("status", "Active")],
        );
        self.find_errors(&params, mode).await
    }

    /// Retrieves the active errors raised by a tree.
    pub async fn find_active_errors_by_tree(
        &self,
        source: &str,
        group: &str,
        tree: &str,
        params: &[(String, String)],
        mode: ErrorMode,
    ) -> KineticResult<KineticResponse> {
        let params = with_params(
            params,
            &[
                ("source", source),
                ("group", group),
                ("tree", tree),
                ("status", "Active"),
            ],
        );
        self.find_errors(&params, mode).await
    }

    /// Retrieves the active errors raised by a single tree node.
    pub async fn find_active_errors_by_node(
        &self,
        source: &str,
        group: &str,
        tree: &str,
        node_id: &str,
        params: &[(String, String)],
        mode: ErrorMode,
    ) -> KineticResult<KineticResponse> {
        let params = with_params(
            params,
            &[
                ("source", source),
                ("group", group),
                ("tree", tree),
                ("nodeId", node_id),
                ("status", "Active"),
            ],
        );
        self.find_errors(&params, mode).await
    }

    /// Retrieves the errors recorded for a single run.
    pub async fn find_errors_by_run(
        &self,
        run_id: u64,
        params: &[(String, String)],
        mode: ErrorMode,
    ) -> KineticResult<KineticResponse> {
        let run_id = run_id.to_string();
        let params = with_params(params, &[("runId", run_id.as_str())]);
        self.find_errors(&params, mode).await
    }
}

/// Copies the caller's parameters and appends the preset pairs in order.
fn with_params(params: &[(String, String)], presets: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut params = params.to_vec();
    params.extend(
        presets
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string())),
    );
    params
}
