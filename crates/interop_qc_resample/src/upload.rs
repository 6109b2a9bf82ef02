use std::fs;
use std::path::Path;

use interop_qc_core::uris;
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// Fixed object name the rewritten report is uploaded under.
pub const MULTIQC_PARQUET_NAME: &str = "multiqc.parquet";

/// An ICAv2 folder record the upload lands in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFolder {
    pub project_id: String,
    pub data_id: String,
    pub path: String,
}

/// Seam over the ICAv2 upload flow.
pub trait UploadTarget {
    fn resolve_or_create_folder(&self, s3_folder_uri: &str) -> Result<ProjectFolder, String>;

    fn create_file_upload_url(
        &self,
        folder: &ProjectFolder,
        file_name: &str,
    ) -> Result<String, String>;

    fn put_object(&self, upload_url: &str, body: &[u8]) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    pub destination_folder: String,
    pub bytes_uploaded: usize,
    pub sha256: String,
}

/// Upload a local parquet report next to `output_uri`: the destination
/// folder is the URI's parent, created on demand, and the object name is
/// fixed to `multiqc.parquet`.
pub fn upload_parquet_file(
    target: &impl UploadTarget,
    input_file: &Path,
    output_uri: &str,
) -> Result<UploadSummary, String> {
    let destination_folder_uri =
        uris::parent_directory_uri(output_uri).map_err(|error| error.message().to_string())?;
    let folder = target.resolve_or_create_folder(&destination_folder_uri)?;
    let upload_url = target.create_file_upload_url(&folder, MULTIQC_PARQUET_NAME)?;

    let body = fs::read(input_file)
        .map_err(|error| format!("failed to read '{}': {error}", input_file.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(&body);
    let sha256 = format!("{:x}", hasher.finalize());
    let bytes_uploaded = body.len();

    target.put_object(&upload_url, &body)?;

    Ok(UploadSummary {
        destination_folder: destination_folder_uri,
        bytes_uploaded,
        sha256,
    })
}
