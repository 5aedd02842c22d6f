use thiserror::Error;

/// Errors raised while loading configuration from the environment
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Required environment variable is not set
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

/// Errors that can occur while proxying an image to the inference endpoint
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Request carried no image payload
    #[error("No image data provided")]
    MissingImage,

    /// Request body is not the expected JSON document
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// Image payload is not valid base64
    #[error("Invalid base64 image data: {0}")]
    InvalidImage(#[from] base64::DecodeError),

    /// The endpoint call itself failed
    #[error("Endpoint invocation failed: {0}")]
    Invocation(String),

    /// The endpoint answered with something other than JSON
    #[error("Invalid prediction payload: {0}")]
    InvalidPrediction(String),
}

impl ProxyError {
    /// Returns true if this error should be reported as a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(self, ProxyError::MissingImage)
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }

    /// Message placed in the `error` field of the response body
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Errors raised by the knowledge base sync flow
#[derive(Error, Debug)]
pub enum SyncError {
    /// Parameter Store call failed
    #[error("Failed to read parameter {name}: {reason}")]
    ParameterFetch { name: String, reason: String },

    /// Parameter exists but holds no value
    #[error("Parameter {0} has no value")]
    ParameterMissingValue(String),

    /// Parameter value is not JSON
    #[error("Parameter value is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Parameter value is JSON but not a list
    #[error("Parameter value must be a JSON array of knowledge base entries")]
    NotAList,

    /// Starting one ingestion job failed
    #[error("{0}")]
    IngestionStart(String),
}

/// Errors raised by the chat image filter
#[derive(Error, Debug)]
pub enum FilterError {
    /// Transport level failure talking to the inference API
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Inference API answered with a non-success status
    #[error("Inference API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Every attempt failed; only the last failure is kept
    #[error("Sagemaker Failed: {last}")]
    InferenceFailed {
        attempts: u32,
        last: Box<FilterError>,
    },
}
