// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the lifecycle of one handler invocation.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Invocation accepted a storage event.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use docai_relay::observability::messages::invocation::InvocationStarted;
///
/// let msg = InvocationStarted {
///     bucket: "docs",
///     key: "invoice.pdf",
/// };
///
/// assert_eq!(msg.to_string(), "Processing s3://docs/invoice.pdf");
/// ```
pub struct InvocationStarted<'a> {
    pub bucket: &'a str,
    pub key: &'a str,
}

impl Display for InvocationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Processing s3://{}/{}", self.bucket, self.key)
    }
}

impl StructuredLog for InvocationStarted<'_> {
    fn log(&self) {
        tracing::info!(bucket = self.bucket, key = self.key, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "invocation",
            span_name = name,
            bucket = self.bucket,
            key = self.key,
        )
    }
}

/// Invocation finished and the output object was written.
///
/// # Log Level
/// `info!` - Important operational event
pub struct InvocationCompleted<'a> {
    pub bucket: &'a str,
    pub source_key: &'a str,
    pub output_key: &'a str,
    pub duration: std::time::Duration,
}

impl Display for InvocationCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processed s3://{}/{} -> s3://{}/{} in {:?}",
            self.bucket, self.source_key, self.bucket, self.output_key, self.duration
        )
    }
}

impl StructuredLog for InvocationCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            bucket = self.bucket,
            source_key = self.source_key,
            output_key = self.output_key,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "invocation_completed",
            span_name = name,
            bucket = self.bucket,
            output_key = self.output_key,
        )
    }
}

/// A pipeline step failed and the invocation is aborting.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use docai_relay::errors::HandlerError;
/// use docai_relay::observability::messages::invocation::StepFailed;
///
/// let error = HandlerError::MalformedEvent("Records is empty".to_string());
/// let msg = StepFailed {
///     step: "parse_event",
///     error: &error,
/// };
///
/// assert!(msg.to_string().contains("parse_event"));
/// ```
pub struct StepFailed<'a> {
    pub step: &'a str,
    pub error: &'a crate::errors::HandlerError,
}

impl Display for StepFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Step '{}' failed: {}", self.step, self.error)
    }
}

impl StructuredLog for StepFailed<'_> {
    fn log(&self) {
        tracing::error!(
            step = self.step,
            error_kind = self.error.kind(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "step_failed",
            span_name = name,
            step = self.step,
            error_kind = self.error.kind(),
        )
    }
}
