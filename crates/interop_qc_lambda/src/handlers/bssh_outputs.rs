use crate::runtime::contract::BSSH_TO_AWS_S3_WORKFLOW_NAME;
use crate::runtime::run_resolution::{is_matching_succeeded_run, sort_most_recent_first};
use crate::runtime::uris;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::adapters::workflow_api::WorkflowApi;

use super::log_handler_info;

const COMPONENT: &str = "bssh_outputs_handler";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BsshOutputsEvent {
    pub instrument_run_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BsshFastqOutputs {
    #[serde(rename = "bclConvertReportDirectory")]
    pub bclconvert_report_directory: String,
    #[serde(rename = "interOpDirectory")]
    pub interop_directory: String,
}

/// Locate the InterOp and Reports directories for an instrument run by
/// scanning the `bssh-to-aws-s3` copy runs, newest first, for the latest
/// succeeded run keyed on that instrument run id. `None` maps to an empty
/// JSON object at the binary boundary, matching the upstream contract.
pub fn handle_bssh_outputs(
    event: BsshOutputsEvent,
    workflow_api: &dyn WorkflowApi,
) -> Result<Option<BsshFastqOutputs>, String> {
    let mut runs =
        workflow_api.list_workflow_runs_by_workflow_name(BSSH_TO_AWS_S3_WORKFLOW_NAME)?;
    if runs.is_empty() {
        runs = workflow_api
            .list_workflow_runs_by_workflow_name_legacy(BSSH_TO_AWS_S3_WORKFLOW_NAME)?;
    }
    if runs.is_empty() {
        log_handler_info(
            COMPONENT,
            "no_copy_runs_found",
            json!({"instrumentRunId": event.instrument_run_id.clone()}),
        );
        return Ok(None);
    }

    sort_most_recent_first(&mut runs);

    for run in &runs {
        let latest_payload = workflow_api.get_latest_payload_from_workflow_run(&run.orcabus_id)?;
        if !is_matching_succeeded_run(run, &latest_payload, &event.instrument_run_id) {
            continue;
        }

        let output_uri = latest_payload.engine_output_uri().ok_or_else(|| {
            format!(
                "workflow run '{}' payload has no engineParameters.outputUri",
                run.orcabus_id
            )
        })?;
        return Ok(Some(BsshFastqOutputs {
            bclconvert_report_directory: uris::bclconvert_reports_directory(output_uri),
            interop_directory: uris::interop_directory(output_uri),
        }));
    }

    log_handler_info(
        COMPONENT,
        "no_matching_copy_run",
        json!({
            "instrumentRunId": event.instrument_run_id.clone(),
            "runs_scanned": runs.len(),
        }),
    );
    Ok(None)
}
