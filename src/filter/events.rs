use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Progress notification sent to the chat host while the filter works.
///
/// Serializes to the host's `{"type": ..., "data": {...}}` envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum FilterEvent {
    Status { description: String, done: bool },
    Message { content: String },
}

impl FilterEvent {
    pub fn status(description: impl Into<String>, done: bool) -> Self {
        FilterEvent::Status {
            description: description.into(),
            done,
        }
    }

    pub fn message(content: impl Into<String>) -> Self {
        FilterEvent::Message {
            content: content.into(),
        }
    }
}

/// Receives progress notifications. Delivery failures are not the filter's
/// concern.
#[async_trait]
pub trait EventEmitter: Send + Sync {
    async fn emit(&self, event: FilterEvent);
}

#[async_trait]
impl EventEmitter for UnboundedSender<FilterEvent> {
    async fn emit(&self, event: FilterEvent) {
        if self.send(event).is_err() {
            debug!("Event listener dropped");
        }
    }
}
