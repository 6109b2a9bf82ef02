//! Environment resolution for the Lambda binaries. Values come from env vars
//! when set, otherwise from the SSM parameter / Secrets Manager secret the
//! deployment wires in.

use aws_config::SdkConfig;
use lambda_runtime::Error;

pub struct OrcabusApiConfig {
    pub endpoint: String,
    pub token: String,
}

pub async fn load_orcabus_api_config(sdk_config: &SdkConfig) -> Result<OrcabusApiConfig, Error> {
    let endpoint = match std::env::var("ORCABUS_API_BASE_URL") {
        Ok(value) => value,
        Err(_) => {
            let parameter_name = std::env::var("HOSTNAME_SSM_PARAMETER_NAME").map_err(|_| {
                Error::from("ORCABUS_API_BASE_URL or HOSTNAME_SSM_PARAMETER_NAME must be configured")
            })?;
            let hostname = get_ssm_parameter(sdk_config, &parameter_name).await?;
            format!("https://{hostname}")
        }
    };

    let token = match std::env::var("ORCABUS_TOKEN") {
        Ok(value) => value,
        Err(_) => {
            let secret_id = std::env::var("ORCABUS_TOKEN_SECRET_ID").map_err(|_| {
                Error::from("ORCABUS_TOKEN or ORCABUS_TOKEN_SECRET_ID must be configured")
            })?;
            get_secret(sdk_config, &secret_id).await?
        }
    };

    Ok(OrcabusApiConfig { endpoint, token })
}

pub struct Icav2ApiConfig {
    pub endpoint: String,
    pub token: String,
}

pub async fn load_icav2_api_config(sdk_config: &SdkConfig) -> Result<Icav2ApiConfig, Error> {
    let endpoint = std::env::var("ICAV2_BASE_URL")
        .unwrap_or_else(|_| "https://ica.illumina.com/ica/rest".to_string());

    let token = match std::env::var("ICAV2_ACCESS_TOKEN") {
        Ok(value) => value,
        Err(_) => {
            let secret_id = std::env::var("ICAV2_ACCESS_TOKEN_SECRET_ID").map_err(|_| {
                Error::from("ICAV2_ACCESS_TOKEN or ICAV2_ACCESS_TOKEN_SECRET_ID must be configured")
            })?;
            get_secret(sdk_config, &secret_id).await?
        }
    };

    Ok(Icav2ApiConfig { endpoint, token })
}

pub async fn get_ssm_parameter(
    sdk_config: &SdkConfig,
    parameter_name: &str,
) -> Result<String, Error> {
    let client = aws_sdk_ssm::Client::new(sdk_config);
    let response = client
        .get_parameter()
        .name(parameter_name)
        .send()
        .await
        .map_err(|error| {
            Error::from(format!(
                "failed to read SSM parameter '{parameter_name}': {error}"
            ))
        })?;
    response
        .parameter()
        .and_then(|parameter| parameter.value())
        .map(str::to_string)
        .ok_or_else(|| Error::from(format!("SSM parameter '{parameter_name}' has no value")))
}

pub async fn get_secret(sdk_config: &SdkConfig, secret_id: &str) -> Result<String, Error> {
    let client = aws_sdk_secretsmanager::Client::new(sdk_config);
    let response = client
        .get_secret_value()
        .secret_id(secret_id)
        .send()
        .await
        .map_err(|error| Error::from(format!("failed to read secret '{secret_id}': {error}")))?;
    response
        .secret_string()
        .map(str::to_string)
        .ok_or_else(|| Error::from(format!("secret '{secret_id}' has no string value")))
}
