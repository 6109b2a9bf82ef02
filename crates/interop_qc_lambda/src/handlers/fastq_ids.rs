use serde::{Deserialize, Serialize};

use crate::adapters::fastq_api::FastqApi;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FastqIdsEvent {
    pub instrument_run_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FastqIdsResponse {
    pub fastq_id_list: Vec<String>,
}

pub fn handle_fastq_ids(
    event: FastqIdsEvent,
    fastq_api: &dyn FastqApi,
) -> Result<FastqIdsResponse, String> {
    Ok(FastqIdsResponse {
        fastq_id_list: fastq_api.get_fastqs_in_instrument_run_id(&event.instrument_run_id)?,
    })
}
