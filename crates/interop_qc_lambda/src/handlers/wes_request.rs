use crate::runtime::contract::{
    CwlDirectory, CwlFile, Icav2WesRequest, Icav2WesRequestInputs, ReadyEventDetail,
};
use serde::{Deserialize, Serialize};

/// READY event detail plus the per-fastq parquet reports collected upstream.
/// The default pipeline/project ids fill gaps the READY event left open.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WesRequestEvent {
    pub ready_event_detail: ReadyEventDetail,
    pub parquet_file_uri_list: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_pipeline_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WesRequestResponse {
    #[serde(rename = "icav2WesRequestEventDetail")]
    pub icav2_wes_request_event_detail: Icav2WesRequest,
}

/// Convert the READY detail into an ICAv2 WES submission request with
/// CWL-shaped inputs.
pub fn handle_wes_request(event: WesRequestEvent) -> WesRequestResponse {
    let detail = event.ready_event_detail;
    let data = detail.payload.data;

    let mut engine_parameters = data.engine_parameters;
    if engine_parameters.pipeline_id.is_none() {
        engine_parameters.pipeline_id = event.default_pipeline_id;
    }
    if engine_parameters.project_id.is_none() {
        engine_parameters.project_id = event.default_project_id;
    }

    WesRequestResponse {
        icav2_wes_request_event_detail: Icav2WesRequest {
            name: detail.workflow_run_name,
            inputs: Icav2WesRequestInputs {
                bclconvert_report_directory: CwlDirectory::at(
                    data.inputs.bclconvert_report_directory,
                ),
                interop_directory: CwlDirectory::at(data.inputs.interop_directory),
                instrument_run_id: data.inputs.instrument_run_id,
                additional_parquet_files: event
                    .parquet_file_uri_list
                    .into_iter()
                    .map(CwlFile::at)
                    .collect(),
            },
            engine_parameters,
            tags: data.tags,
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::contract::{
        EngineParameters, Library, ReadyInputs, ReadyPayload, ReadyPayloadData, Workflow,
        READY_STATUS,
    };
    use serde_json::json;

    use super::*;

    fn ready_event_detail(pipeline_id: Option<&str>) -> ReadyEventDetail {
        ReadyEventDetail {
            status: READY_STATUS.to_string(),
            timestamp: "2025-04-22T00:09:07Z".to_string(),
            portal_run_id: "20250417abcd1234".to_string(),
            workflow: Workflow {
                name: "bclconvert-interop-qc".to_string(),
                version: "2025.05.24".to_string(),
            },
            workflow_run_name:
                "umccr--automated--bclconvert-interop-qc--2024-05-24--20250417abcd1234".to_string(),
            libraries: vec![Library {
                orcabus_id: "lib.12345".to_string(),
                library_id: "L20202020".to_string(),
            }],
            payload: ReadyPayload {
                version: "2024.07.01".to_string(),
                data: ReadyPayloadData {
                    inputs: ReadyInputs {
                        instrument_run_id: "20231010_pi1-07_0329_A222N7LTD3".to_string(),
                        interop_directory: "s3://cache/primary/run/InterOp/".to_string(),
                        bclconvert_report_directory: "s3://cache/primary/run/Reports/".to_string(),
                    },
                    engine_parameters: EngineParameters {
                        output_uri: Some("s3://cache/analysis/run/".to_string()),
                        logs_uri: Some("s3://cache/logs/run/".to_string()),
                        pipeline_id: pipeline_id.map(str::to_string),
                        ..EngineParameters::default()
                    },
                    tags: json!({"instrumentRunId": "20231010_pi1-07_0329_A222N7LTD3"}),
                },
            },
        }
    }

    #[test]
    fn shapes_cwl_inputs_from_ready_detail() {
        let response = handle_wes_request(WesRequestEvent {
            ready_event_detail: ready_event_detail(Some("55a8bb47")),
            parquet_file_uri_list: vec![
                "s3://cache/multiqc/L2301197.parquet".to_string(),
                "s3://cache/multiqc/L2301198.parquet".to_string(),
            ],
            default_pipeline_id: None,
            default_project_id: None,
        });
        let request = response.icav2_wes_request_event_detail;

        assert_eq!(
            request.name,
            "umccr--automated--bclconvert-interop-qc--2024-05-24--20250417abcd1234"
        );
        assert_eq!(
            request.inputs.bclconvert_report_directory,
            CwlDirectory::at("s3://cache/primary/run/Reports/")
        );
        assert_eq!(
            request.inputs.interop_directory,
            CwlDirectory::at("s3://cache/primary/run/InterOp/")
        );
        assert_eq!(
            request.inputs.additional_parquet_files,
            vec![
                CwlFile::at("s3://cache/multiqc/L2301197.parquet"),
                CwlFile::at("s3://cache/multiqc/L2301198.parquet"),
            ]
        );
    }

    #[test]
    fn defaults_fill_missing_engine_parameter_ids_only() {
        let response = handle_wes_request(WesRequestEvent {
            ready_event_detail: ready_event_detail(Some("from-ready-event")),
            parquet_file_uri_list: Vec::new(),
            default_pipeline_id: Some("default-pipeline".to_string()),
            default_project_id: Some("default-project".to_string()),
        });
        let parameters = response.icav2_wes_request_event_detail.engine_parameters;

        assert_eq!(parameters.pipeline_id.as_deref(), Some("from-ready-event"));
        assert_eq!(parameters.project_id.as_deref(), Some("default-project"));
    }

    #[test]
    fn cwl_values_serialize_with_class_and_location() {
        let response = handle_wes_request(WesRequestEvent {
            ready_event_detail: ready_event_detail(None),
            parquet_file_uri_list: vec!["s3://cache/multiqc/L2301197.parquet".to_string()],
            default_pipeline_id: None,
            default_project_id: None,
        });
        let serialized = serde_json::to_value(&response).expect("response should serialize");
        let inputs = &serialized["icav2WesRequestEventDetail"]["inputs"];

        assert_eq!(inputs["interop_directory"]["class"], "Directory");
        assert_eq!(
            inputs["additional_parquet_files"][0],
            json!({"class": "File", "location": "s3://cache/multiqc/L2301197.parquet"})
        );
    }
}
