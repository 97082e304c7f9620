//! Document encoding for transport through the contents API.
//!
//! JSON value -> pretty-printed UTF-8 text (2-space indent) -> base64.

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use serde_json::Value;

use crate::error::{Result, SyncError};

pub fn encode_document(value: &Value) -> Result<String> {
    let text = serde_json::to_string_pretty(value)?;
    Ok(BASE64_STANDARD.encode(text.as_bytes()))
}

/// Decode a base64 payload as returned by GitHub.
///
/// GitHub wraps the payload at 60 columns, so ASCII whitespace is skipped.
pub fn decode_document(payload: &str) -> Result<Value> {
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = BASE64_STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| SyncError::decode(format!("invalid base64: {}", e)))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| SyncError::decode(format!("invalid UTF-8: {}", e)))?;
    serde_json::from_str(&text).map_err(|e| SyncError::decode(format!("invalid JSON: {}", e)))
}
