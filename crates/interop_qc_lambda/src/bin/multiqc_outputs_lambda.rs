use interop_qc_lambda::adapters::fastq_api::OrcabusFastqClient;
use interop_qc_lambda::config::load_orcabus_api_config;
use interop_qc_lambda::handlers::multiqc_outputs::{
    handle_multiqc_outputs, MultiqcOutputsEvent, MultiqcOutputsResponse,
};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<MultiqcOutputsResponse, Error> {
    let event: MultiqcOutputsEvent = serde_json::from_value(event.payload)
        .map_err(|error| Error::from(format!("invalid multiqc outputs event: {error}")))?;

    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let api_config = load_orcabus_api_config(&sdk_config).await?;
    let fastq_api = OrcabusFastqClient::new(&api_config.endpoint, api_config.token);

    handle_multiqc_outputs(event, &fastq_api).map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
