//! Chat inlet filter that classifies an attached image before the LLM sees
//! the conversation.

pub mod client;
pub mod events;
pub mod locator;
pub mod retry;

use crate::error::FilterError;
use client::PredictionClient;
use events::{EventEmitter, FilterEvent};
use locator::{find_image_in_latest_message, remove_base64_header, ImageLocation};
use retry::{retry, RetryError};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

pub const PROCESSING_STATUS: &str = "✨Sagemaker processing...";
pub const SUCCESS_STATUS: &str = "🎉Sagemaker process success. Handover to the LLM...";

/// Admin-facing filter settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Valves {
    /// Priority level for the filter operations
    pub priority: i32,
    /// Maximum attempts for the inference request
    pub max_retries: u32,
    /// API Gateway key sent as `x-api-key`
    pub sm_api_key: String,
    /// Inference API base url without trailing `/`
    pub sm_base_url: String,
    /// Inference API route, e.g. `/predict`
    pub sm_endpoint: String,
}

impl Default for Valves {
    fn default() -> Self {
        Self {
            priority: 0,
            max_retries: 3,
            sm_api_key: String::new(),
            sm_base_url: String::new(),
            sm_endpoint: "/predict".to_string(),
        }
    }
}

/// Inlet filter that sends the latest user image to the inference API and
/// folds the prediction into the prompt.
pub struct Filter {
    valves: Valves,
    client: PredictionClient,
}

impl Filter {
    pub fn new(valves: Valves) -> Self {
        Self::with_http_client(valves, reqwest::Client::new())
    }

    pub fn with_http_client(valves: Valves, http: reqwest::Client) -> Self {
        let client = PredictionClient::new(
            http,
            &valves.sm_base_url,
            &valves.sm_endpoint,
            valves.sm_api_key.clone(),
        );
        Self { valves, client }
    }

    /// Sends the image to the inference API, retrying up to
    /// `max_retries` times.
    pub async fn call_inference(
        &self,
        image: &str,
        emitter: &dyn EventEmitter,
    ) -> Result<Value, FilterError> {
        emitter
            .emit(FilterEvent::status(PROCESSING_STATUS, false))
            .await;

        let payload = remove_base64_header(image);
        let result = retry(self.valves.max_retries, |_| self.client.predict(payload))
            .await
            .map_err(|RetryError { attempts, last }| FilterError::InferenceFailed {
                attempts,
                last: Box::new(last),
            })?;

        info!(url = self.client.url(), "Inference result received");
        emitter
            .emit(FilterEvent::status(SUCCESS_STATUS, true))
            .await;
        emitter
            .emit(FilterEvent::message(format!(
                "The raw prediction result is: {result}. \n"
            )))
            .await;

        Ok(result)
    }

    /// Pre-processes a chat completion request body.
    ///
    /// When the latest user message carries an image, its prediction is
    /// appended to the message text. Failures leave the body untouched.
    pub async fn inlet(
        &self,
        mut body: Value,
        emitter: &dyn EventEmitter,
        user: Option<&Value>,
    ) -> Value {
        info!(user = ?user, "inlet");

        let location = match body
            .get("messages")
            .and_then(Value::as_array)
            .and_then(|messages| find_image_in_latest_message(messages))
        {
            Some(location) => location,
            None => return body,
        };

        match self.call_inference(&location.image, emitter).await {
            Ok(result) => annotate(&mut body, &location, &result),
            Err(e) => error!("Error: {}", e),
        }

        body
    }

    /// Post-processes the completion response; passes it through unchanged.
    pub fn outlet(&self, body: Value, user: Option<&Value>) -> Value {
        info!(user = ?user, "outlet");
        body
    }
}

fn annotate(body: &mut Value, location: &ImageLocation, result: &Value) {
    let note = format!(
        "Additionaly, this is an image that has been classified by SageMaker. The result is : {result}. Based on that result, try to dig more details or reasoning."
    );

    let Some(content) = body
        .get_mut("messages")
        .and_then(|messages| messages.get_mut(location.message_index))
        .and_then(|message| message.get_mut("content"))
        .and_then(Value::as_array_mut)
    else {
        return;
    };

    match location.text_index.and_then(|index| content.get_mut(index)) {
        Some(block) => {
            let original = block
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            block["text"] = Value::String(original + &note);
        }
        None => content.push(json!({"type": "text", "text": note})),
    }
}
