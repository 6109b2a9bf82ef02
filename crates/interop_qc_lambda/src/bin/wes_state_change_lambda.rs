use chrono::{SecondsFormat, Utc};
use interop_qc_lambda::adapters::workflow_api::OrcabusWorkflowClient;
use interop_qc_lambda::config::load_orcabus_api_config;
use interop_qc_lambda::handlers::wes_state_change::{
    handle_wes_state_change, WesStateChangeEvent, WesStateChangeResponse,
};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<WesStateChangeResponse, Error> {
    let event: WesStateChangeEvent = serde_json::from_value(event.payload)
        .map_err(|error| Error::from(format!("invalid WES state change event: {error}")))?;

    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let api_config = load_orcabus_api_config(&sdk_config).await?;
    let workflow_api = OrcabusWorkflowClient::new(&api_config.endpoint, api_config.token);

    let event_time = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    handle_wes_state_change(event, &event_time, &workflow_api).map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
