pub mod bssh_outputs;
pub mod draft_data;
pub mod fastq_ids;
pub mod interop_qc_ready;
pub mod multiqc_outputs;
pub mod uri_conversion;
pub mod wes_request;
pub mod wes_state_change;

pub(crate) fn log_handler_info(component: &str, event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        serde_json::json!({
            "component": component,
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

pub(crate) fn log_handler_error(component: &str, event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        serde_json::json!({
            "component": component,
            "level": "error",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}
