use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::block_on_current;

pub const FASTQ_ENDPOINT: &str = "api/v1/fastq";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastqLibrary {
    pub library_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastqS3Object {
    pub s3_uri: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequaliReports {
    pub multiqc_parquet: Option<FastqS3Object>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastqQc {
    pub sequali_reports: Option<SequaliReports>,
}

/// A fastq record with the S3 detail expansion applied.
#[derive(Debug, Clone, Deserialize)]
pub struct FastqDetail {
    pub id: String,
    pub library: FastqLibrary,
    pub lane: u32,
    pub qc: Option<FastqQc>,
}

impl FastqDetail {
    /// URI of the per-fastq MultiQC parquet report, when QC has produced one.
    pub fn multiqc_parquet_uri(&self) -> Option<&str> {
        self.qc
            .as_ref()
            .and_then(|qc| qc.sequali_reports.as_ref())
            .and_then(|reports| reports.multiqc_parquet.as_ref())
            .map(|object| object.s3_uri.as_str())
    }
}

/// Lookup seam for the fastq manager service.
pub trait FastqApi {
    fn get_fastqs_in_instrument_run_id(
        &self,
        instrument_run_id: &str,
    ) -> Result<Vec<String>, String>;

    fn get_fastq(&self, fastq_id: &str, include_s3_details: bool)
        -> Result<FastqDetail, String>;
}

#[derive(Debug, Deserialize)]
struct FastqIdRecord {
    id: String,
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

/// Thin HTTP client for the orcabus fastq manager.
#[derive(Debug, Clone)]
pub struct OrcabusFastqClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl OrcabusFastqClient {
    pub fn new(endpoint: &str, token: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build fastq API client");
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
                .map_err(|error| format!("fastq API request failed: {error}"))?
                .error_for_status()
                .map_err(|error| format!("fastq API returned an error: {error}"))?;
            response
                .json::<T>()
                .await
                .map_err(|error| format!("failed to decode fastq API response: {error}"))
        })
    }
}

impl FastqApi for OrcabusFastqClient {
    fn get_fastqs_in_instrument_run_id(
        &self,
        instrument_run_id: &str,
    ) -> Result<Vec<String>, String> {
        let first_url = Url::parse_with_params(
            &format!("{}/{FASTQ_ENDPOINT}", self.endpoint),
            &[("instrumentRunId", instrument_run_id)],
        )
        .map_err(|error| format!("failed to build fastq API URL: {error}"))?;

        let mut fastq_ids = Vec::new();
        let mut next_url = Some(first_url.to_string());
        while let Some(page_url) = next_url.take() {
            let page: Page<FastqIdRecord> = self.get_json(&page_url)?;
            fastq_ids.extend(page.results.into_iter().map(|record| record.id));
            next_url = page.links.and_then(|links| links.next);
        }
        Ok(fastq_ids)
    }

    fn get_fastq(
        &self,
        fastq_id: &str,
        include_s3_details: bool,
    ) -> Result<FastqDetail, String> {
        let url = Url::parse_with_params(
            &format!("{}/{FASTQ_ENDPOINT}/{fastq_id}", self.endpoint),
            &[(
                "includeS3Details",
                if include_s3_details { "true" } else { "false" },
            )],
        )
        .map_err(|error| format!("failed to build fastq API URL: {error}"))?;
        self.get_json(url.as_str())
    }
}
