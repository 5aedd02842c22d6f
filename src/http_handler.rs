use crate::endpoint::InferenceEndpoint;
use crate::error::ProxyError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use lambda_http::{Body, Error, Request, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Incoming request payload
#[derive(Deserialize)]
struct PredictRequest {
    /// Base64 encoded image, without a data-URI header
    #[serde(default)]
    image: Option<String>,
}

/// Response payload wrapping the endpoint's prediction
#[derive(Serialize)]
struct PredictResponse {
    prediction: Value,
}

/// Error response payload
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Lambda handler function.
///
/// Receives an API Gateway proxy request with a JSON body carrying a base64
/// image, forwards the decoded bytes to the inference endpoint and returns
/// the prediction as JSON.
pub async fn function_handler(
    endpoint: Arc<dyn InferenceEndpoint>,
    event: Request,
) -> Result<Response<Body>, Error> {
    match predict(endpoint.as_ref(), event.body()).await {
        Ok(prediction) => {
            let response_json = serde_json::to_string(&PredictResponse { prediction })?;

            let resp = Response::builder()
                .status(200)
                .header("content-type", "application/json")
                .body(response_json.into())
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

            Ok(resp)
        }
        Err(e) => {
            if e.is_client_error() {
                warn!("Rejected request: {}", e);
            } else {
                error!("Prediction failed: {}", e);
            }
            Ok(error_from_proxy_error(&e))
        }
    }
}

/// Parses the body, decodes the image and invokes the endpoint.
async fn predict(endpoint: &dyn InferenceEndpoint, body: &[u8]) -> Result<Value, ProxyError> {
    // An absent body is treated the same as a body without an image
    if body.is_empty() {
        return Err(ProxyError::MissingImage);
    }

    let request: PredictRequest = serde_json::from_slice(body)?;
    let image = match request.image {
        Some(image) if !image.is_empty() => image,
        _ => return Err(ProxyError::MissingImage),
    };

    let image_bytes = decode_image(&image)?;
    if image_bytes.is_empty() {
        return Err(ProxyError::MissingImage);
    }
    info!(image_bytes = image_bytes.len(), "Invoking inference endpoint");

    let prediction = endpoint.invoke(image_bytes).await?;
    info!("Prediction received");

    Ok(prediction)
}

/// Decodes standard base64, skipping characters outside the alphabet such as
/// the line breaks of wrapped input.
fn decode_image(image: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let cleaned: String = image
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
        .collect();
    STANDARD.decode(cleaned)
}

/// Helper function to create error responses from ProxyError
fn error_from_proxy_error(err: &ProxyError) -> Response<Body> {
    error_response(err.status_code(), &err.user_message())
}

/// Helper function to create error responses
fn error_response(status: u16, message: &str) -> Response<Body> {
    let body = serde_json::to_string(&ErrorResponse {
        error: message.to_string(),
    })
    .unwrap_or_else(|_| r#"{"error":"Unknown error"}"#.to_string());

    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap_or_else(|e| {
            error!("Failed to build error response: {}", e);
            let mut fallback = Response::new(Body::from(r#"{"error":"Internal server error"}"#));
            *fallback.status_mut() = lambda_http::http::StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
}
