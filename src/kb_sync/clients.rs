use crate::error::SyncError;
use async_trait::async_trait;

/// Reads one stored configuration value by name.
#[async_trait]
pub trait ParameterSource: Send + Sync {
    async fn get_parameter(&self, name: &str) -> Result<String, SyncError>;
}

/// Starts one knowledge base ingestion job and returns its job id.
#[async_trait]
pub trait IngestionStarter: Send + Sync {
    async fn start_ingestion_job(
        &self,
        knowledge_base_id: &str,
        data_source_id: Option<&str>,
    ) -> Result<String, SyncError>;
}

/// SSM Parameter Store backed [`ParameterSource`]
pub struct SsmParameters {
    client: aws_sdk_ssm::Client,
}

impl SsmParameters {
    pub fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ParameterSource for SsmParameters {
    async fn get_parameter(&self, name: &str) -> Result<String, SyncError> {
        let output = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| SyncError::ParameterFetch {
                name: name.to_string(),
                reason: aws_sdk_ssm::error::DisplayErrorContext(&e).to_string(),
            })?;

        output
            .parameter()
            .and_then(|p| p.value())
            .map(str::to_string)
            .ok_or_else(|| SyncError::ParameterMissingValue(name.to_string()))
    }
}

/// Bedrock Agent backed [`IngestionStarter`]
pub struct BedrockIngestion {
    client: aws_sdk_bedrockagent::Client,
}

impl BedrockIngestion {
    pub fn new(client: aws_sdk_bedrockagent::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IngestionStarter for BedrockIngestion {
    async fn start_ingestion_job(
        &self,
        knowledge_base_id: &str,
        data_source_id: Option<&str>,
    ) -> Result<String, SyncError> {
        let output = self
            .client
            .start_ingestion_job()
            .knowledge_base_id(knowledge_base_id)
            .set_data_source_id(data_source_id.map(str::to_string))
            .send()
            .await
            .map_err(|e| {
                SyncError::IngestionStart(
                    aws_sdk_bedrockagent::error::DisplayErrorContext(&e).to_string(),
                )
            })?;

        output
            .ingestion_job()
            .map(|job| job.ingestion_job_id().to_string())
            .ok_or_else(|| {
                SyncError::IngestionStart("response carried no ingestion job".to_string())
            })
    }
}
