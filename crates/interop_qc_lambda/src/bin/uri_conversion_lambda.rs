use interop_qc_lambda::adapters::project_data::Icav2ProjectDataClient;
use interop_qc_lambda::config::load_icav2_api_config;
use interop_qc_lambda::handlers::uri_conversion::{
    handle_uri_conversion, UriConversionEvent, UriConversionResponse,
};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<UriConversionResponse, Error> {
    let event: UriConversionEvent = serde_json::from_value(event.payload)
        .map_err(|error| Error::from(format!("invalid uri conversion event: {error}")))?;

    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let api_config = load_icav2_api_config(&sdk_config).await?;
    let project_data_api = Icav2ProjectDataClient::new(&api_config.endpoint, api_config.token);

    handle_uri_conversion(event, &project_data_api).map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
