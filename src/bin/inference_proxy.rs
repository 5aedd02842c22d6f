use aws_config::BehaviorVersion;
use lambda_http::{run, service_fn, tracing, Error};
use sagemaker_kb_glue::config::ProxyConfig;
use sagemaker_kb_glue::endpoint::{InferenceEndpoint, SageMakerEndpoint};
use sagemaker_kb_glue::http_handler::function_handler;
use sagemaker_kb_glue::logging;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for CloudWatch logs
    logging::init();

    let config = ProxyConfig::from_env().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        Box::new(e) as Box<dyn std::error::Error + Send + Sync>
    })?;

    // Build the SageMaker client once during cold start and share it across
    // handler invocations.
    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let client = aws_sdk_sagemakerruntime::Client::new(&aws_config);
    tracing::info!(endpoint = %config.endpoint_name, "Inference proxy ready");
    let endpoint: Arc<dyn InferenceEndpoint> =
        Arc::new(SageMakerEndpoint::new(client, config.endpoint_name));

    run(service_fn(move |event| {
        let endpoint = endpoint.clone();
        function_handler(endpoint, event)
    }))
    .await
}
