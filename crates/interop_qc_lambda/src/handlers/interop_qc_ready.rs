use crate::runtime::contract::{
    EngineParameters, Library, ReadyEventDetail, ReadyInputs, ReadyPayload, ReadyPayloadData,
    Workflow, READY_STATUS,
};
use crate::runtime::uris;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Event emitted once the BSSH fastq copy has landed the primary data in S3.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BsshFastqCopySucceededEvent {
    pub workflow_name: String,
    pub workflow_version: String,
    pub workflow_run_name: String,
    pub payload_version: String,
    pub portal_run_id: String,
    pub instrument_run_id: String,
    pub primary_data_output_uri: String,
    pub libraries: Vec<Library>,
    pub workflow_output_prefix: String,
    pub workflow_logs_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteropQcReadyResponse {
    #[serde(rename = "bclconvertInterOpQcEventDetail")]
    pub bclconvert_interop_qc_event_detail: ReadyEventDetail,
}

/// Remap the copy-succeeded event into the READY detail for the BCLConvert
/// InterOp QC workflow run.
pub fn handle_interop_qc_ready(
    event: BsshFastqCopySucceededEvent,
    event_time: &str,
) -> InteropQcReadyResponse {
    InteropQcReadyResponse {
        bclconvert_interop_qc_event_detail: ReadyEventDetail {
            status: READY_STATUS.to_string(),
            timestamp: event_time.to_string(),
            portal_run_id: event.portal_run_id.clone(),
            workflow: Workflow {
                name: event.workflow_name,
                version: event.workflow_version,
            },
            workflow_run_name: event.workflow_run_name,
            libraries: event.libraries,
            payload: ReadyPayload {
                version: event.payload_version,
                data: ReadyPayloadData {
                    inputs: ReadyInputs {
                        instrument_run_id: event.instrument_run_id.clone(),
                        interop_directory: uris::interop_directory(
                            &event.primary_data_output_uri,
                        ),
                        bclconvert_report_directory: uris::bclconvert_reports_directory(
                            &event.primary_data_output_uri,
                        ),
                    },
                    engine_parameters: EngineParameters {
                        output_uri: Some(uris::workflow_output_uri(
                            &event.workflow_output_prefix,
                            &event.portal_run_id,
                        )),
                        logs_uri: Some(uris::workflow_logs_uri(
                            &event.workflow_logs_prefix,
                            &event.portal_run_id,
                        )),
                        ..EngineParameters::default()
                    },
                    tags: json!({"instrumentRunId": event.instrument_run_id}),
                },
            },
        },
    }
}
