use serde_json::Value;

/// Where the image and the text to annotate live in the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLocation {
    pub message_index: usize,
    /// Index of the first image block
    pub image_index: usize,
    /// Index of the last text block, if the message has one
    pub text_index: Option<usize>,
    /// Image URL or data URI of the first image block
    pub image: String,
}

/// Scans the latest message for an image to classify.
///
/// Only a user message with list content qualifies. When several images are
/// attached only the first one is used.
pub fn find_image_in_latest_message(messages: &[Value]) -> Option<ImageLocation> {
    let message_index = messages.len().checked_sub(1)?;
    let message = &messages[message_index];

    if message.get("role").and_then(Value::as_str) != Some("user") {
        return None;
    }
    let blocks = message.get("content").and_then(Value::as_array)?;

    let mut image_index = None;
    let mut text_index = None;

    for (index, block) in blocks.iter().enumerate() {
        match block.get("type").and_then(Value::as_str) {
            Some("image_url") if image_index.is_none() => image_index = Some(index),
            Some("text") => text_index = Some(index),
            _ => {}
        }
    }

    // The first image block is the one used, even when it carries no URL
    let image_index = image_index?;
    let image = image_url(&blocks[image_index])?.to_string();

    Some(ImageLocation {
        message_index,
        image_index,
        text_index,
        image,
    })
}

/// Reads `image_url.url`, falling back to a flat `url` field.
fn image_url(block: &Value) -> Option<&str> {
    block
        .get("image_url")
        .and_then(|inner| inner.get("url"))
        .or_else(|| block.get("url"))
        .and_then(Value::as_str)
}

/// Strips a `data:image/...;base64,` style header.
///
/// Everything after the first comma is kept; input without a comma is
/// returned as-is.
pub fn remove_base64_header(data: &str) -> &str {
    match data.split_once(',') {
        Some((_, payload)) => payload,
        None => data,
    }
}
