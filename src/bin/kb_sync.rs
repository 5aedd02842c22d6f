use aws_config::BehaviorVersion;
use lambda_runtime::{run, service_fn, Error};
use sagemaker_kb_glue::config::SyncConfig;
use sagemaker_kb_glue::kb_sync::{function_handler, BedrockIngestion, SsmParameters, SyncService};
use sagemaker_kb_glue::logging;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for CloudWatch logs
    logging::init();

    let config = SyncConfig::from_env();

    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let service = Arc::new(SyncService::new(
        Arc::new(SsmParameters::new(aws_sdk_ssm::Client::new(&aws_config))),
        Arc::new(BedrockIngestion::new(aws_sdk_bedrockagent::Client::new(&aws_config))),
        config.parameter_name,
    ));

    run(service_fn(move |event| {
        let service = service.clone();
        function_handler(service, event)
    }))
    .await
}
