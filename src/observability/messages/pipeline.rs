// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for progress through the intake steps.
//!
//! This module contains message types for logging events related to:
//! * Source object retrieval
//! * Extraction request submission and completion
//! * Output persistence

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// The source object body was fully buffered.
///
/// # Log Level
/// `debug!` - Step detail
pub struct SourceCollected<'a> {
    pub key: &'a str,
    pub size: usize,
    pub mime_type: &'a str,
}

impl Display for SourceCollected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Collected '{}': {} bytes, mime_type={}",
            self.key, self.size, self.mime_type
        )
    }
}

impl StructuredLog for SourceCollected<'_> {
    fn log(&self) {
        tracing::debug!(
            key = self.key,
            size = self.size,
            mime_type = self.mime_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("source_collected", span_name = name, key = self.key)
    }
}

/// An extraction request is about to be sent.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use docai_relay::observability::messages::pipeline::ExtractionSubmitted;
///
/// let msg = ExtractionSubmitted {
///     processor_name: "projects/p/locations/us/processors/proc",
///     mime_type: "application/pdf",
///     size: 2048,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ExtractionSubmitted<'a> {
    pub processor_name: &'a str,
    pub mime_type: &'a str,
    pub size: usize,
}

impl Display for ExtractionSubmitted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Submitting {} bytes ({}) to '{}'",
            self.size, self.mime_type, self.processor_name
        )
    }
}

impl StructuredLog for ExtractionSubmitted<'_> {
    fn log(&self) {
        tracing::info!(
            processor_name = self.processor_name,
            mime_type = self.mime_type,
            size = self.size,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "extraction",
            span_name = name,
            processor_name = self.processor_name,
            mime_type = self.mime_type,
        )
    }
}

/// The remote service returned extracted text.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ExtractionCompleted<'a> {
    pub processor_name: &'a str,
    pub text_len: usize,
    pub duration: std::time::Duration,
}

impl Display for ExtractionCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Extraction by '{}' returned {} bytes of text in {:?}",
            self.processor_name, self.text_len, self.duration
        )
    }
}

impl StructuredLog for ExtractionCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            processor_name = self.processor_name,
            text_len = self.text_len,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "extraction_completed",
            span_name = name,
            processor_name = self.processor_name,
        )
    }
}

/// Extracted text was written to storage.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use docai_relay::observability::messages::pipeline::OutputPersisted;
///
/// let msg = OutputPersisted {
///     bucket: "docs",
///     key: "processed_text/invoice.txt",
///     size: 5,
/// };
///
/// assert_eq!(msg.to_string(), "Extracted text saved to processed_text/invoice.txt (5 bytes)");
/// ```
pub struct OutputPersisted<'a> {
    pub bucket: &'a str,
    pub key: &'a str,
    pub size: usize,
}

impl Display for OutputPersisted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Extracted text saved to {} ({} bytes)", self.key, self.size)
    }
}

impl StructuredLog for OutputPersisted<'_> {
    fn log(&self) {
        tracing::info!(
            bucket = self.bucket,
            key = self.key,
            size = self.size,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "output_persisted",
            span_name = name,
            bucket = self.bucket,
            key = self.key,
        )
    }
}
