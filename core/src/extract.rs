//! Generated-text extraction from inference responses
//!
//! Inference providers disagree on where the generated text lives, and the
//! same provider has moved it between releases. Extraction therefore walks an
//! ordered list of JSON pointers and takes the first non-empty string; when
//! none match, the whole response is serialized so the caller still gets the
//! model output in some form.

use serde_json::Value;
use tracing::{debug, warn};

/// JSON pointers probed in order
pub const TEXT_POINTERS: &[&str] = &[
    "/response",
    "/result/response",
    "/result",
    "/text",
    "/output",
    "/generated_text",
    "/choices/0/text",
    "/choices/0/message/content",
];

/// Pull the generated text out of an inference response
pub fn extract_generated_text(response: &Value) -> String {
    if let Value::String(text) = response {
        return text.clone();
    }

    for pointer in TEXT_POINTERS {
        if let Some(text) = response.pointer(pointer).and_then(Value::as_str) {
            if !text.is_empty() {
                debug!("Inference text found at {}", pointer);
                return text.to_string();
            }
        }
    }

    warn!("No known text field in inference response, returning it serialized");
    response.to_string()
}
