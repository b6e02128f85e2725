// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Request-scoped values passed between pipeline steps.
//!
//! Nothing here outlives an invocation.

use bytes::Bytes;
use serde::Serialize;

use crate::config::consts::OUTPUT_CONTENT_TYPE;

/// A fetched document and its inferred media type.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPayload {
    pub bytes: Bytes,
    pub mime_type: String,
}

impl DocumentPayload {
    pub fn new(bytes: Bytes, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// Text returned by the extraction service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub text: String,
}

/// The object written back to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub key: String,
    pub body: String,
    pub content_type: &'static str,
}

impl OutputRecord {
    /// A plain-text record under `key`.
    pub fn text(key: String, body: String) -> Self {
        Self {
            key,
            body,
            content_type: OUTPUT_CONTENT_TYPE,
        }
    }
}

/// Success acknowledgment returned to the function runtime.
///
/// Serializes as `{"statusCode": 200, "body": "..."}` where `body` is itself a
/// JSON-encoded string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    /// Acknowledge that the extracted text was saved under `output_key`.
    pub fn saved(output_key: &str) -> Self {
        let message = format!("Document processed and saved successfully to {output_key}.");
        Self {
            status_code: 200,
            // A String always serializes; the fallback keeps the signature infallible.
            body: serde_json::to_string(&message).unwrap_or(message),
        }
    }
}
