use interop_qc_lambda::config::get_ssm_parameter;
use interop_qc_lambda::handlers::wes_request::{
    handle_wes_request, WesRequestEvent, WesRequestResponse,
};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<WesRequestResponse, Error> {
    let mut request: WesRequestEvent = serde_json::from_value(event.payload)
        .map_err(|error| Error::from(format!("invalid WES request event: {error}")))?;

    // Defaults for the pipeline/project ids come from SSM when the READY
    // event and the invoking state machine both left them out.
    let pipeline_parameter = std::env::var("DEFAULT_PIPELINE_ID_SSM_PARAMETER_NAME").ok();
    let project_parameter = std::env::var("DEFAULT_PROJECT_ID_SSM_PARAMETER_NAME").ok();
    if pipeline_parameter.is_some() || project_parameter.is_some() {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        if let Some(parameter_name) = pipeline_parameter {
            if request.default_pipeline_id.is_none() {
                request.default_pipeline_id =
                    Some(get_ssm_parameter(&sdk_config, &parameter_name).await?);
            }
        }
        if let Some(parameter_name) = project_parameter {
            if request.default_project_id.is_none() {
                request.default_project_id =
                    Some(get_ssm_parameter(&sdk_config, &parameter_name).await?);
            }
        }
    }

    Ok(handle_wes_request(request))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
