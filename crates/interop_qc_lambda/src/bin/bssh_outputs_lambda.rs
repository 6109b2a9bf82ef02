use interop_qc_lambda::adapters::workflow_api::OrcabusWorkflowClient;
use interop_qc_lambda::config::load_orcabus_api_config;
use interop_qc_lambda::handlers::bssh_outputs::{handle_bssh_outputs, BsshOutputsEvent};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::{json, Value};

async fn handle_request(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let event: BsshOutputsEvent = serde_json::from_value(event.payload)
        .map_err(|error| Error::from(format!("invalid bssh outputs event: {error}")))?;

    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let api_config = load_orcabus_api_config(&sdk_config).await?;
    let workflow_api = OrcabusWorkflowClient::new(&api_config.endpoint, api_config.token);

    match handle_bssh_outputs(event, &workflow_api).map_err(Error::from)? {
        Some(outputs) => serde_json::to_value(outputs)
            .map_err(|error| Error::from(format!("failed to serialize outputs: {error}"))),
        // No matching copy run: the state machine treats an empty object as
        // "nothing to resolve".
        None => Ok(json!({})),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
