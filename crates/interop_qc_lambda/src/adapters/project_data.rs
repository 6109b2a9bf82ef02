use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use serde_json::json;

use super::block_on_current;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// An ICAv2 project-data record. Folder paths carry a trailing slash.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub project_id: String,
    pub data_id: String,
    pub path: String,
}

/// ICAv2 URI of a project-data record.
pub fn icav2_uri(data: &ProjectData) -> String {
    format!("icav2://{}/{}", data.project_id, data.path.trim_start_matches('/'))
}

/// Errors raised by project-data lookups. `NotFound` is its own variant so
/// callers can fall back to creating the parent folder.
#[derive(Debug)]
pub enum ProjectDataError {
    NotFound,
    Api(String),
}

impl std::fmt::Display for ProjectDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => f.write_str("project data not found"),
            Self::Api(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for ProjectDataError {}

/// Lookup seam for the ICAv2 project-data service.
pub trait ProjectDataApi {
    fn resolve_uri(&self, s3_uri: &str) -> Result<ProjectData, ProjectDataError>;

    fn resolve_or_create_folder(
        &self,
        s3_folder_uri: &str,
    ) -> Result<ProjectData, ProjectDataError>;
}

#[derive(Debug, Deserialize)]
struct ProjectDataPage {
    items: Vec<ProjectData>,
}

/// Thin HTTP client for the ICAv2 project-data endpoints.
#[derive(Debug, Clone)]
pub struct Icav2ProjectDataClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl Icav2ProjectDataClient {
    pub fn new(endpoint: &str, token: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build ICAv2 client");
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn search_uri(&self, uri: &str) -> Result<Option<ProjectData>, ProjectDataError> {
        let url = Url::parse_with_params(
            &format!("{}/api/project-data", self.endpoint),
            &[("uri", uri)],
        )
        .map_err(|error| ProjectDataError::Api(format!("failed to build ICAv2 URL: {error}")))?;

        let request = self.client.get(url).bearer_auth(&self.token);
        let page: ProjectDataPage = block_on_current(async move {
            let response = request
                .send()
                .await
                .map_err(|error| ProjectDataError::Api(format!("ICAv2 request failed: {error}")))?
                .error_for_status()
                .map_err(|error| {
                    ProjectDataError::Api(format!("ICAv2 returned an error: {error}"))
                })?;
            response.json().await.map_err(|error| {
                ProjectDataError::Api(format!("failed to decode ICAv2 response: {error}"))
            })
        })?;
        Ok(page.items.into_iter().next())
    }
}

impl ProjectDataApi for Icav2ProjectDataClient {
    fn resolve_uri(&self, s3_uri: &str) -> Result<ProjectData, ProjectDataError> {
        self.search_uri(s3_uri)?.ok_or(ProjectDataError::NotFound)
    }

    fn resolve_or_create_folder(
        &self,
        s3_folder_uri: &str,
    ) -> Result<ProjectData, ProjectDataError> {
        if let Some(existing) = self.search_uri(s3_folder_uri)? {
            return Ok(existing);
        }

        let request = self
            .client
            .post(format!("{}/api/project-data", self.endpoint))
            .bearer_auth(&self.token)
            .json(&json!({"uri": s3_folder_uri, "type": "FOLDER"}));
        block_on_current(async move {
            let response = request
                .send()
                .await
                .map_err(|error| ProjectDataError::Api(format!("ICAv2 request failed: {error}")))?
                .error_for_status()
                .map_err(|error| {
                    ProjectDataError::Api(format!("ICAv2 folder creation failed: {error}"))
                })?;
            response.json().await.map_err(|error| {
                ProjectDataError::Api(format!("failed to decode ICAv2 response: {error}"))
            })
        })
    }
}
