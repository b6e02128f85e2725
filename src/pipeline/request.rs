// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use crate::config::ProcessorIdentity;
use crate::errors::HandlerResult;
use crate::pipeline::types::DocumentPayload;

/// A single-document request for the remote extraction service.
///
/// Serializes to the wire shape
/// `{"name": ..., "rawDocument": {"content": <base64>, "mimeType": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRequest {
    pub name: String,
    pub raw_document: RawDocument,
}

/// Inline document content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    pub content: String,
    pub mime_type: String,
}

impl ExtractionRequest {
    /// Assemble the request for `payload` addressed to the processor named by `identity`.
    ///
    /// Fails with a configuration error when any identity component is absent.
    ///
    /// # Example
    /// ```
    /// use bytes::Bytes;
    /// use docai_relay::config::ProcessorIdentity;
    /// use docai_relay::pipeline::request::ExtractionRequest;
    /// use docai_relay::pipeline::types::DocumentPayload;
    ///
    /// let identity = ProcessorIdentity::new("p", "us", "proc");
    /// let payload = DocumentPayload::new(Bytes::from_static(b"hi"), "application/pdf");
    ///
    /// let request = ExtractionRequest::build(&identity, &payload).unwrap();
    /// assert_eq!(request.name, "projects/p/locations/us/processors/proc");
    /// assert_eq!(request.raw_document.content, "aGk=");
    /// ```
    pub fn build(identity: &ProcessorIdentity, payload: &DocumentPayload) -> HandlerResult<Self> {
        let name = identity.processor_name()?;
        Ok(Self {
            name,
            raw_document: RawDocument {
                content: STANDARD.encode(&payload.bytes),
                mime_type: payload.mime_type.clone(),
            },
        })
    }

    /// The `locations/{x}` segment of the processor name.
    pub fn location(&self) -> Option<&str> {
        let mut segments = self.name.split('/');
        while let Some(segment) = segments.next() {
            if segment == "locations" {
                return segments.next().filter(|s| !s.is_empty());
            }
        }
        None
    }
}
