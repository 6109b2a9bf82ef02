use std::time::Duration;

use crate::runtime::contract::{WorkflowPayload, WorkflowRunDetail};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::block_on_current;

pub const WORKFLOW_RUN_ENDPOINT: &str = "api/v1/workflowrun";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Lookup seam for the workflow manager service.
pub trait WorkflowApi {
    fn list_workflow_runs_by_workflow_name(
        &self,
        workflow_name: &str,
    ) -> Result<Vec<WorkflowRunDetail>, String>;

    /// Older deployments only index runs under the `workflow__workflowName`
    /// query name.
    fn list_workflow_runs_by_workflow_name_legacy(
        &self,
        workflow_name: &str,
    ) -> Result<Vec<WorkflowRunDetail>, String>;

    fn get_workflow_run_from_portal_run_id(
        &self,
        portal_run_id: &str,
    ) -> Result<WorkflowRunDetail, String>;

    fn get_latest_payload_from_workflow_run(
        &self,
        orcabus_id: &str,
    ) -> Result<WorkflowPayload, String>;

    fn get_latest_payload_from_portal_run_id(
        &self,
        portal_run_id: &str,
    ) -> Result<WorkflowPayload, String> {
        let workflow_run = self.get_workflow_run_from_portal_run_id(portal_run_id)?;
        self.get_latest_payload_from_workflow_run(&workflow_run.orcabus_id)
    }
}

#[derive(Debug, Deserialize)]
struct PageLinks {
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default)]
    links: Option<PageLinks>,
    results: Vec<T>,
}

/// Thin HTTP client for the orcabus workflow manager.
#[derive(Debug, Clone)]
pub struct OrcabusWorkflowClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl OrcabusWorkflowClient {
    pub fn new(endpoint: &str, token: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build workflow API client");
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, String> {
        let request = self.client.get(url).bearer_auth(&self.token);
        block_on_current(async move {
            let response = request
                .send()
                .await
                .map_err(|error| format!("workflow API request failed: {error}"))?
                .error_for_status()
                .map_err(|error| format!("workflow API returned an error: {error}"))?;
            response
                .json::<T>()
                .await
                .map_err(|error| format!("failed to decode workflow API response: {error}"))
        })
    }

    /// Walk the paginated listing until the `links.next` chain runs out.
    fn get_results<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, String> {
        let first_url = Url::parse_with_params(&format!("{}/{path}", self.endpoint), query)
            .map_err(|error| format!("failed to build workflow API URL: {error}"))?;

        let mut results = Vec::new();
        let mut next_url = Some(first_url.to_string());
        while let Some(page_url) = next_url.take() {
            let page: Page<T> = self.get_json(&page_url)?;
            results.extend(page.results);
            next_url = page.links.and_then(|links| links.next);
        }
        Ok(results)
    }
}

impl WorkflowApi for OrcabusWorkflowClient {
    fn list_workflow_runs_by_workflow_name(
        &self,
        workflow_name: &str,
    ) -> Result<Vec<WorkflowRunDetail>, String> {
        self.get_results(WORKFLOW_RUN_ENDPOINT, &[("workflowName", workflow_name)])
    }

    fn list_workflow_runs_by_workflow_name_legacy(
        &self,
        workflow_name: &str,
    ) -> Result<Vec<WorkflowRunDetail>, String> {
        self.get_results(
            WORKFLOW_RUN_ENDPOINT,
            &[("workflow__workflowName", workflow_name)],
        )
    }

    fn get_workflow_run_from_portal_run_id(
        &self,
        portal_run_id: &str,
    ) -> Result<WorkflowRunDetail, String> {
        let mut runs: Vec<WorkflowRunDetail> =
            self.get_results(WORKFLOW_RUN_ENDPOINT, &[("portalRunId", portal_run_id)])?;
        if runs.is_empty() {
            return Err(format!(
                "no workflow run found for portal run id '{portal_run_id}'"
            ));
        }
        Ok(runs.swap_remove(0))
    }

    fn get_latest_payload_from_workflow_run(
        &self,
        orcabus_id: &str,
    ) -> Result<WorkflowPayload, String> {
        self.get_json(&format!(
            "{}/{WORKFLOW_RUN_ENDPOINT}/{orcabus_id}/payload",
            self.endpoint
        ))
    }
}
