use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Workflow-run status a READY event is emitted with.
pub const READY_STATUS: &str = "READY";
/// Terminal status that triggers output construction downstream.
pub const SUCCEEDED_STATUS: &str = "SUCCEEDED";
/// Workflow name of the primary-data copy runs scanned for InterOp outputs.
pub const BSSH_TO_AWS_S3_WORKFLOW_NAME: &str = "bssh-to-aws-s3";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workflow {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub orcabus_id: String,
    pub library_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowState {
    pub status: String,
}

/// A tracked workflow run as returned by the workflow manager API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRunDetail {
    pub orcabus_id: String,
    pub workflow: Workflow,
    pub workflow_run_name: String,
    pub current_state: WorkflowState,
    #[serde(default)]
    pub libraries: Vec<Library>,
}

/// Versioned payload attached to a workflow run. The `data` sections differ
/// per workflow, so they stay untyped and handlers read the fields they need.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowPayload {
    pub version: String,
    pub data: Value,
}

impl WorkflowPayload {
    /// `data.engineParameters.outputUri`, when present.
    pub fn engine_output_uri(&self) -> Option<&str> {
        self.data
            .get("engineParameters")
            .and_then(|parameters| parameters.get("outputUri"))
            .and_then(Value::as_str)
    }

    /// `data.inputs.instrumentRunId`, empty when any link is missing.
    pub fn input_instrument_run_id(&self) -> &str {
        self.data
            .get("inputs")
            .and_then(|inputs| inputs.get("instrumentRunId"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

/// Engine parameters attached to payloads and WES submissions. Everything is
/// optional: READY events carry only the URIs, WES state changes add the
/// pipeline/project/analysis identifiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EngineParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<String>,
    #[serde(
        rename = "icav2WesAnalysisOrcaBusId",
        skip_serializing_if = "Option::is_none"
    )]
    pub icav2_wes_analysis_orcabus_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReadyInputs {
    pub instrument_run_id: String,
    #[serde(rename = "interOpDirectory")]
    pub interop_directory: String,
    #[serde(rename = "bclConvertReportDirectory")]
    pub bclconvert_report_directory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReadyPayloadData {
    pub inputs: ReadyInputs,
    pub engine_parameters: EngineParameters,
    pub tags: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadyPayload {
    pub version: String,
    pub data: ReadyPayloadData,
}

/// The READY event detail for a BCLConvert InterOp QC workflow run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReadyEventDetail {
    pub status: String,
    pub timestamp: String,
    pub portal_run_id: String,
    pub workflow: Workflow,
    pub workflow_run_name: String,
    pub libraries: Vec<Library>,
    pub payload: ReadyPayload,
}

/// CWL `Directory` input value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CwlDirectory {
    pub class: String,
    pub location: String,
}

impl CwlDirectory {
    pub fn at(location: impl Into<String>) -> Self {
        Self {
            class: "Directory".to_string(),
            location: location.into(),
        }
    }
}

/// CWL `File` input value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CwlFile {
    pub class: String,
    pub location: String,
}

impl CwlFile {
    pub fn at(location: impl Into<String>) -> Self {
        Self {
            class: "File".to_string(),
            location: location.into(),
        }
    }
}

/// CWL-shaped inputs for the InterOp QC pipeline; snake_case on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Icav2WesRequestInputs {
    pub bclconvert_report_directory: CwlDirectory,
    pub interop_directory: CwlDirectory,
    pub instrument_run_id: String,
    pub additional_parquet_files: Vec<CwlFile>,
}

/// Submission request for an ICAv2 WES analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Icav2WesRequest {
    pub name: String,
    pub inputs: Icav2WesRequestInputs,
    pub engine_parameters: EngineParameters,
    pub tags: Value,
}

/// Tags the WES service carries on an analysis; both correlation keys are
/// required to route the state change back to a workflow run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WesRunTags {
    pub portal_run_id: String,
    pub instrument_run_id: String,
}

/// State-change notification for an ICAv2 WES analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Icav2WesStateChangeEvent {
    pub id: String,
    pub name: String,
    pub inputs: Value,
    pub engine_parameters: EngineParameters,
    pub tags: WesRunTags,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps_launch_execution_arn: Option<String>,
    #[serde(default)]
    pub icav2_analysis_id: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

/// Workflow-run state-change event emitted back onto the event bus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRunStateChangeEvent {
    pub status: String,
    pub timestamp: String,
    pub portal_run_id: String,
    pub workflow: Workflow,
    pub workflow_run_name: String,
    pub libraries: Vec<Library>,
    pub payload: WorkflowPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ready_event_round_trips_wire_names() {
        let detail: ReadyEventDetail = serde_json::from_value(json!({
            "status": "READY",
            "timestamp": "2025-04-22T00:09:07Z",
            "portalRunId": "20250417abcd1234",
            "workflow": {"name": "bclconvert-interop-qc", "version": "2025.05.24"},
            "workflowRunName": "umccr--automated--bclconvert-interop-qc--2024-05-24--20250417abcd1234",
            "libraries": [{"orcabusId": "lib.12345", "libraryId": "L20202020"}],
            "payload": {
                "version": "2024.07.01",
                "data": {
                    "inputs": {
                        "instrumentRunId": "20231010_pi1-07_0329_A222N7LTD3",
                        "interOpDirectory": "s3://bucket/primary/run/InterOp/",
                        "bclConvertReportDirectory": "s3://bucket/primary/run/Reports/"
                    },
                    "engineParameters": {
                        "outputUri": "s3://bucket/analysis/run/",
                        "logsUri": "s3://bucket/logs/run/"
                    },
                    "tags": {"instrumentRunId": "20231010_pi1-07_0329_A222N7LTD3"}
                }
            }
        }))
        .expect("ready event should parse");

        assert_eq!(detail.payload.data.inputs.interop_directory, "s3://bucket/primary/run/InterOp/");

        let serialized = serde_json::to_value(&detail).expect("ready event should serialize");
        assert_eq!(
            serialized["payload"]["data"]["inputs"]["bclConvertReportDirectory"],
            "s3://bucket/primary/run/Reports/"
        );
        assert_eq!(serialized["portalRunId"], "20250417abcd1234");
    }

    #[test]
    fn engine_parameters_omit_absent_fields() {
        let parameters = EngineParameters {
            output_uri: Some("s3://bucket/analysis/run/".to_string()),
            logs_uri: Some("s3://bucket/logs/run/".to_string()),
            ..EngineParameters::default()
        };

        let serialized = serde_json::to_value(&parameters).expect("parameters should serialize");
        let object = serialized.as_object().expect("parameters serialize to an object");
        assert_eq!(object.len(), 2);
        assert!(!object.contains_key("pipelineId"));
    }

    #[test]
    fn payload_accessors_tolerate_missing_sections() {
        let payload = WorkflowPayload {
            version: "2024.07.01".to_string(),
            data: json!({"outputs": {}}),
        };

        assert_eq!(payload.engine_output_uri(), None);
        assert_eq!(payload.input_instrument_run_id(), "");
    }

    #[test]
    fn wes_state_change_event_parses_terminal_fields() {
        let event: Icav2WesStateChangeEvent = serde_json::from_value(json!({
            "id": "iwa.01JWAGE5PWS5JN48VWNPYSTJRN",
            "name": "umccr--automated--bclconvert-interop-qc--2024-05-24--20250417abcd1234",
            "inputs": {},
            "engineParameters": {
                "pipelineId": "55a8bb47-d32b-48dd-9eac-373fd487ccec",
                "projectId": "ea19a3f5-ec7c-4940-a474-c31cd91dbad4",
                "outputUri": "s3://bucket/analysis/run/",
                "logsUri": "s3://bucket/logs/run/"
            },
            "tags": {
                "instrumentRunId": "20231010_pi1-07_0329_A222N7LTD3",
                "portalRunId": "20250417abcd1234"
            },
            "status": "SUBMITTED",
            "submissionTime": "2025-05-28T03:54:35.612655",
            "icav2AnalysisId": null,
            "startTime": "2025-05-28T03:54:35.662401+00:00",
            "endTime": null
        }))
        .expect("state change event should parse");

        assert_eq!(event.tags.portal_run_id, "20250417abcd1234");
        assert_eq!(event.icav2_analysis_id, None);
        assert_eq!(
            event.engine_parameters.output_uri.as_deref(),
            Some("s3://bucket/analysis/run/")
        );
    }
}
