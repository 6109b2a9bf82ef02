use serde::{Deserialize, Serialize};

use crate::adapters::fastq_api::FastqApi;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MultiqcOutputsEvent {
    #[serde(default)]
    pub fastq_id_list: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MultiqcOutputEntry {
    pub fastq_id: String,
    pub library_id: String,
    pub lane: u32,
    pub multiqc_parquet_file_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MultiqcOutputsResponse {
    pub multiqc_output_object: Vec<MultiqcOutputEntry>,
}

/// Resolve each fastq id to its library, lane, and per-fastq MultiQC parquet
/// report location.
pub fn handle_multiqc_outputs(
    event: MultiqcOutputsEvent,
    fastq_api: &dyn FastqApi,
) -> Result<MultiqcOutputsResponse, String> {
    let mut entries = Vec::with_capacity(event.fastq_id_list.len());
    for fastq_id in &event.fastq_id_list {
        let fastq = fastq_api.get_fastq(fastq_id, true)?;
        let multiqc_parquet_file_uri = fastq
            .multiqc_parquet_uri()
            .ok_or_else(|| format!("fastq '{fastq_id}' has no MultiQC parquet report"))?
            .to_string();
        entries.push(MultiqcOutputEntry {
            fastq_id: fastq.id,
            library_id: fastq.library.library_id,
            lane: fastq.lane,
            multiqc_parquet_file_uri,
        });
    }

    Ok(MultiqcOutputsResponse {
        multiqc_output_object: entries,
    })
}
