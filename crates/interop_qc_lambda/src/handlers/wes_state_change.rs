use crate::runtime::contract::{
    Icav2WesStateChangeEvent, WorkflowPayload, WorkflowRunStateChangeEvent, SUCCEEDED_STATUS,
};
use crate::runtime::uris;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::adapters::workflow_api::WorkflowApi;

use super::{log_handler_error, log_handler_info};

const COMPONENT: &str = "wes_state_change_handler";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WesStateChangeEvent {
    #[serde(rename = "icav2WesStateChangeEvent")]
    pub icav2_wes_state_change_event: Icav2WesStateChangeEvent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WesStateChangeResponse {
    #[serde(rename = "workflowRunStateChangeEvent")]
    pub workflow_run_state_change_event: WorkflowRunStateChangeEvent,
}

/// Convert an ICAv2 WES state change into a workflow-run state-change event,
/// resolving the workflow run and latest payload through the portal run id
/// carried in the analysis tags. A `SUCCEEDED` analysis also grafts the
/// MultiQC output locations into the payload data.
pub fn handle_wes_state_change(
    event: WesStateChangeEvent,
    event_time: &str,
    workflow_api: &dyn WorkflowApi,
) -> Result<WesStateChangeResponse, String> {
    let wes_event = event.icav2_wes_state_change_event;
    let output_uri = wes_event
        .engine_parameters
        .output_uri
        .as_deref()
        .ok_or("ICAv2 WES event has no engineParameters.outputUri")?;

    let outputs = if wes_event.status == SUCCEEDED_STATUS {
        let instrument_run_id = &wes_event.tags.instrument_run_id;
        Some(json!({
            "interOpSummaryDir": uris::interop_summary_dir(output_uri),
            "multiQcOutputDir": uris::multiqc_output_dir(output_uri),
            "multiQcHtmlReportUri": uris::multiqc_html_report_uri(output_uri, instrument_run_id),
            "multiQcQlimsCsvReportUri": uris::multiqc_qlims_csv_uri(output_uri, instrument_run_id),
        }))
    } else {
        None
    };

    let portal_run_id = wes_event.tags.portal_run_id.clone();
    log_handler_info(
        COMPONENT,
        "workflow_run_lookup",
        json!({
            "portalRunId": portal_run_id.clone(),
            "status": wes_event.status.clone(),
        }),
    );

    let workflow_run = workflow_api
        .get_workflow_run_from_portal_run_id(&portal_run_id)
        .map_err(|error| {
            log_handler_error(
                COMPONENT,
                "workflow_run_lookup_failed",
                json!({
                    "portalRunId": portal_run_id.clone(),
                    "error": error.clone(),
                }),
            );
            error
        })?;
    let mut latest_payload =
        workflow_api.get_latest_payload_from_workflow_run(&workflow_run.orcabus_id)?;

    if let Some(outputs) = outputs {
        match latest_payload.data {
            Value::Object(ref mut data) => {
                data.insert("outputs".to_string(), outputs);
            }
            _ => {
                return Err(format!(
                    "latest payload for workflow run '{}' has non-object data",
                    workflow_run.orcabus_id
                ))
            }
        }
    }

    Ok(WesStateChangeResponse {
        workflow_run_state_change_event: WorkflowRunStateChangeEvent {
            status: wes_event.status,
            timestamp: event_time.to_string(),
            portal_run_id,
            workflow: workflow_run.workflow,
            workflow_run_name: workflow_run.workflow_run_name,
            libraries: workflow_run.libraries,
            payload: WorkflowPayload {
                version: latest_payload.version,
                data: latest_payload.data,
            },
        },
    })
}
