use interop_qc_lambda::adapters::workflow_api::OrcabusWorkflowClient;
use interop_qc_lambda::config::load_orcabus_api_config;
use interop_qc_lambda::handlers::draft_data::{
    handle_draft_data, DraftDataEvent, DraftDataResponse,
};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<DraftDataResponse, Error> {
    let event: DraftDataEvent = serde_json::from_value(event.payload)
        .map_err(|error| Error::from(format!("invalid draft data event: {error}")))?;

    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let api_config = load_orcabus_api_config(&sdk_config).await?;
    let workflow_api = OrcabusWorkflowClient::new(&api_config.endpoint, api_config.token);

    handle_draft_data(event, &workflow_api).map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
