//! Request validation
//!
//! Turns an untrusted payload into a [`RenderRequest`] or rejects it. The
//! input is tried as JSON first; text that does not parse is taken verbatim
//! as the URL. Validation is shape-only: unrecognized `format` values pass
//! through here and are rejected by the orchestrator before any engine
//! resource is acquired.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A validated render request
///
/// Serializable so clients of the service can build bodies from the same
/// type; parsing is deliberately manual (see [`parse_request`]) because the
/// accepted input is more tolerant than the canonical shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Target to load, preserved verbatim from the input
    pub url: String,
    #[serde(flatten)]
    pub options: RenderOptions,
}

/// Recognized per-request options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Wire-level output format; absent means SVG
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl RenderRequest {
    /// Request for `url` with default options
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            options: RenderOptions::default(),
        }
    }
}

/// Parse a raw request body.
///
/// Accepted shapes:
/// - raw text that is not valid JSON: used as the URL with default options
/// - a JSON string: used as the URL with default options
/// - a JSON object with a string `url` field and optionally a `format` key;
///   unrecognized keys are ignored
///
/// Anything else (JSON numbers, booleans, `null`, arrays, objects with a
/// missing or non-string `url`, empty URLs) is rejected with `None`.
pub fn parse_request(raw: &str) -> Option<RenderRequest> {
    let value = match serde_json::from_str::<Value>(raw) {
        Ok(value) => value,
        // Not JSON at all: the body itself is the URL
        Err(_) => return non_empty(raw).map(RenderRequest::new),
    };

    match value {
        Value::String(url) => non_empty(&url).map(RenderRequest::new),
        Value::Object(fields) => {
            let url = non_empty(fields.get("url")?.as_str()?)?;
            // A non-string format is kept as its JSON rendering so the
            // orchestrator reports it as unsupported rather than silently
            // falling back to the default.
            let format = fields.get("format").map(|value| match value.as_str() {
                Some(s) => s.to_string(),
                None => value.to_string(),
            });
            Some(RenderRequest {
                url: url.to_string(),
                options: RenderOptions { format },
            })
        }
        _ => None,
    }
}

fn non_empty(url: &str) -> Option<&str> {
    if url.is_empty() {
        None
    } else {
        Some(url)
    }
}
