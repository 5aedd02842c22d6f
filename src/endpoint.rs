use crate::error::ProxyError;
use async_trait::async_trait;
use aws_sdk_sagemakerruntime::error::DisplayErrorContext;
use aws_sdk_sagemakerruntime::primitives::Blob;
use serde_json::Value;

/// Content type sent with the raw image bytes
pub const IMAGE_CONTENT_TYPE: &str = "application/x-image";

/// Content type requested for the prediction
pub const PREDICTION_ACCEPT: &str = "application/json";

/// Something that turns image bytes into a JSON prediction.
#[async_trait]
pub trait InferenceEndpoint: Send + Sync {
    async fn invoke(&self, image: Vec<u8>) -> Result<Value, ProxyError>;
}

/// Invokes a SageMaker real-time endpoint.
///
/// The client is built once during cold start and reused by every
/// invocation the container serves.
pub struct SageMakerEndpoint {
    client: aws_sdk_sagemakerruntime::Client,
    endpoint_name: String,
}

impl SageMakerEndpoint {
    /// Creates a new endpoint handle.
    ///
    /// # Arguments
    /// * `client` - SageMaker runtime client built from the shared AWS config
    /// * `endpoint_name` - Name of the deployed endpoint (e.g., "image-classifier")
    pub fn new(
        client: aws_sdk_sagemakerruntime::Client,
        endpoint_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint_name: endpoint_name.into(),
        }
    }
}

#[async_trait]
impl InferenceEndpoint for SageMakerEndpoint {
    async fn invoke(&self, image: Vec<u8>) -> Result<Value, ProxyError> {
        let output = self
            .client
            .invoke_endpoint()
            .endpoint_name(&self.endpoint_name)
            .content_type(IMAGE_CONTENT_TYPE)
            .accept(PREDICTION_ACCEPT)
            .body(Blob::new(image))
            .send()
            .await
            .map_err(|e| ProxyError::Invocation(DisplayErrorContext(&e).to_string()))?;

        let body = output
            .body()
            .ok_or_else(|| ProxyError::InvalidPrediction("empty response body".to_string()))?;

        parse_prediction(body.as_ref())
    }
}

/// Decodes the endpoint's response bytes as JSON.
pub fn parse_prediction(bytes: &[u8]) -> Result<Value, ProxyError> {
    serde_json::from_slice(bytes)
        .map_err(|e| ProxyError::InvalidPrediction(e.to_string()))
}
