use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::Deserialize;
use serde_json::json;

use crate::upload::{ProjectFolder, UploadTarget};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct ProjectDataPage {
    items: Vec<ProjectFolder>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadUrlResponse {
    upload_url: String,
}

/// Blocking ICAv2 project-data client for the container task.
#[derive(Debug, Clone)]
pub struct Icav2Client {
    client: Client,
    endpoint: String,
    token: String,
}

impl Icav2Client {
    pub fn new(endpoint: &str, token: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build ICAv2 client");
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn search_folder(&self, s3_folder_uri: &str) -> Result<Option<ProjectFolder>, String> {
        let url = Url::parse_with_params(
            &format!("{}/api/project-data", self.endpoint),
            &[("uri", s3_folder_uri)],
        )
        .map_err(|error| format!("failed to build ICAv2 URL: {error}"))?;

        let page: ProjectDataPage = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|error| format!("ICAv2 request failed: {error}"))?
            .error_for_status()
            .map_err(|error| format!("ICAv2 returned an error: {error}"))?
            .json()
            .map_err(|error| format!("failed to decode ICAv2 response: {error}"))?;
        Ok(page.items.into_iter().next())
    }
}

impl UploadTarget for Icav2Client {
    fn resolve_or_create_folder(&self, s3_folder_uri: &str) -> Result<ProjectFolder, String> {
        if let Some(existing) = self.search_folder(s3_folder_uri)? {
            return Ok(existing);
        }

        self.client
            .post(format!("{}/api/project-data", self.endpoint))
            .bearer_auth(&self.token)
            .json(&json!({"uri": s3_folder_uri, "type": "FOLDER"}))
            .send()
            .map_err(|error| format!("ICAv2 request failed: {error}"))?
            .error_for_status()
            .map_err(|error| format!("ICAv2 folder creation failed: {error}"))?
            .json()
            .map_err(|error| format!("failed to decode ICAv2 response: {error}"))
    }

    fn create_file_upload_url(
        &self,
        folder: &ProjectFolder,
        file_name: &str,
    ) -> Result<String, String> {
        let response: UploadUrlResponse = self
            .client
            .post(format!(
                "{}/api/projects/{}/data/{}/files",
                self.endpoint, folder.project_id, folder.data_id
            ))
            .bearer_auth(&self.token)
            .json(&json!({"name": file_name}))
            .send()
            .map_err(|error| format!("ICAv2 request failed: {error}"))?
            .error_for_status()
            .map_err(|error| format!("ICAv2 upload-url creation failed: {error}"))?
            .json()
            .map_err(|error| format!("failed to decode ICAv2 response: {error}"))?;
        Ok(response.upload_url)
    }

    fn put_object(&self, upload_url: &str, body: &[u8]) -> Result<(), String> {
        self.client
            .put(upload_url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(body.to_vec())
            .send()
            .map_err(|error| format!("upload request failed: {error}"))?
            .error_for_status()
            .map(|_| ())
            .map_err(|error| format!("upload was rejected: {error}"))
    }
}
