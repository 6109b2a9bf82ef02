use crate::contract::{WorkflowPayload, WorkflowRunDetail, SUCCEEDED_STATUS};

/// Order runs newest-first. Orcabus ids embed a ULID, so lexicographic
/// descent is reverse-chronological.
pub fn sort_most_recent_first(runs: &mut [WorkflowRunDetail]) {
    runs.sort_by(|a, b| b.orcabus_id.cmp(&a.orcabus_id));
}

/// A run resolves an instrument run id when it has succeeded and its latest
/// payload was keyed on that id. Missing payload fields compare as empty.
pub fn is_matching_succeeded_run(
    run: &WorkflowRunDetail,
    latest_payload: &WorkflowPayload,
    instrument_run_id: &str,
) -> bool {
    latest_payload.input_instrument_run_id() == instrument_run_id
        && run.current_state.status == SUCCEEDED_STATUS
}
