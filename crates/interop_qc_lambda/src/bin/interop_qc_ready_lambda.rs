use chrono::{SecondsFormat, Utc};
use interop_qc_lambda::handlers::interop_qc_ready::{
    handle_interop_qc_ready, BsshFastqCopySucceededEvent, InteropQcReadyResponse,
};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<InteropQcReadyResponse, Error> {
    let event: BsshFastqCopySucceededEvent = serde_json::from_value(event.payload)
        .map_err(|error| Error::from(format!("invalid copy-succeeded event: {error}")))?;

    let event_time = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    Ok(handle_interop_qc_ready(event, &event_time))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
