use crate::runtime::contract::{Library, Workflow, WorkflowPayload};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::adapters::workflow_api::WorkflowApi;

fn empty_object() -> Value {
    json!({})
}

/// Draft-event inputs. The data sections default to empty objects when the
/// caller provides none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DraftDataEvent {
    pub portal_run_id: String,
    #[serde(default = "empty_object")]
    pub inputs: Value,
    #[serde(default = "empty_object")]
    pub tags: Value,
    #[serde(default = "empty_object")]
    pub engine_parameters: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DraftDataEventDetail {
    pub status: String,
    pub portal_run_id: String,
    pub workflow: Workflow,
    pub workflow_run_name: String,
    pub libraries: Vec<Library>,
    pub payload: WorkflowPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DraftDataResponse {
    pub event_detail: DraftDataEventDetail,
}

/// Build a draft data event for a portal run: current status and identity
/// come from the workflow run, the payload version from its latest payload,
/// and the data sections from the caller.
pub fn handle_draft_data(
    event: DraftDataEvent,
    workflow_api: &dyn WorkflowApi,
) -> Result<DraftDataResponse, String> {
    let latest_payload =
        workflow_api.get_latest_payload_from_portal_run_id(&event.portal_run_id)?;
    let workflow_run = workflow_api.get_workflow_run_from_portal_run_id(&event.portal_run_id)?;

    Ok(DraftDataResponse {
        event_detail: DraftDataEventDetail {
            status: workflow_run.current_state.status,
            portal_run_id: event.portal_run_id,
            workflow: workflow_run.workflow,
            workflow_run_name: workflow_run.workflow_run_name,
            libraries: workflow_run.libraries,
            payload: WorkflowPayload {
                version: latest_payload.version,
                data: json!({
                    "inputs": event.inputs,
                    "tags": event.tags,
                    "engineParameters": event.engine_parameters,
                }),
            },
        },
    })
}
