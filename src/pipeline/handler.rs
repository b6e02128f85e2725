// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

use crate::config::HandlerConfig;
use crate::errors::{HandlerError, HandlerResult};
use crate::observability::messages::invocation::{InvocationCompleted, InvocationStarted, StepFailed};
use crate::observability::messages::pipeline::{
    ExtractionCompleted, ExtractionSubmitted, OutputPersisted, SourceCollected,
};
use crate::observability::messages::StructuredLog;
use crate::pipeline::collector::collect_stream;
use crate::pipeline::event::InboundEvent;
use crate::pipeline::mime::resolve_mime_type;
use crate::pipeline::output_key::derive_output_key;
use crate::pipeline::request::ExtractionRequest;
use crate::pipeline::types::{DocumentPayload, HandlerResponse, OutputRecord};
use crate::traits::{DocumentExtractor, ObjectStore};

/// The fallible steps of one invocation, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ParseEvent,
    LoadConfiguration,
    FetchSource,
    CollectBody,
    BuildRequest,
    SubmitExtraction,
    PersistOutput,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::ParseEvent => "parse_event",
            Step::LoadConfiguration => "load_configuration",
            Step::FetchSource => "fetch_source",
            Step::CollectBody => "collect_body",
            Step::BuildRequest => "build_request",
            Step::SubmitExtraction => "submit_extraction",
            Step::PersistOutput => "persist_output",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log a step failure on its way out; the error itself is passed through untouched.
fn checked<T>(step: Step, result: HandlerResult<T>) -> HandlerResult<T> {
    result.map_err(|error| {
        StepFailed {
            step: step.as_str(),
            error: &error,
        }
        .log();
        error
    })
}

/// Turns one storage notification into one extracted-text object.
///
/// Steps run strictly in order and the first failure aborts the invocation:
/// nothing is retried and nothing already done is undone. No output object is
/// written unless extraction produced text. Instances hold no per-invocation
/// state, so one handler may serve concurrent invocations.
#[derive(Clone)]
pub struct EventHandler {
    config: Arc<HandlerConfig>,
    store: Arc<dyn ObjectStore>,
    extractor: Arc<dyn DocumentExtractor>,
}

impl EventHandler {
    pub fn new(
        config: HandlerConfig,
        store: Arc<dyn ObjectStore>,
        extractor: Arc<dyn DocumentExtractor>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            extractor,
        }
    }

    /// Process one notification payload.
    pub async fn handle(&self, event: &Value) -> HandlerResult<HandlerResponse> {
        let started = Instant::now();
        let source = checked(Step::ParseEvent, InboundEvent::from_value(event))?;

        let start_msg = InvocationStarted {
            bucket: &source.bucket,
            key: &source.key,
        };
        let span = start_msg.span("handle");
        start_msg.log();

        let output_key = self.run(&source).instrument(span).await?;

        InvocationCompleted {
            bucket: &source.bucket,
            source_key: &source.key,
            output_key: &output_key,
            duration: started.elapsed(),
        }
        .log();

        Ok(HandlerResponse::saved(&output_key))
    }

    async fn run(&self, source: &InboundEvent) -> HandlerResult<String> {
        checked(Step::LoadConfiguration, self.config.processor.processor_name())?;
        let credentials = checked(Step::LoadConfiguration, self.config.service_account())?;

        let body = checked(
            Step::FetchSource,
            self.store.get_object(&source.bucket, &source.key).await,
        )?;
        let bytes = checked(Step::CollectBody, collect_stream(body).await)?;

        let payload = DocumentPayload::new(bytes, resolve_mime_type(&source.key));
        SourceCollected {
            key: &source.key,
            size: payload.bytes.len(),
            mime_type: &payload.mime_type,
        }
        .log();

        let request = checked(
            Step::BuildRequest,
            ExtractionRequest::build(&self.config.processor, &payload),
        )?;
        ExtractionSubmitted {
            processor_name: &request.name,
            mime_type: &payload.mime_type,
            size: payload.bytes.len(),
        }
        .log();

        let submitted = Instant::now();
        let result = checked(
            Step::SubmitExtraction,
            self.extractor
                .process(&credentials, &request)
                .await
                .and_then(|result| {
                    if result.text.is_empty() {
                        Err(HandlerError::ExtractionService(format!(
                            "'{}' returned no text for '{}'",
                            request.name, source.key
                        )))
                    } else {
                        Ok(result)
                    }
                }),
        )?;
        ExtractionCompleted {
            processor_name: &request.name,
            text_len: result.text.len(),
            duration: submitted.elapsed(),
        }
        .log();

        let record = OutputRecord::text(derive_output_key(&source.key), result.text);
        checked(
            Step::PersistOutput,
            self.store.put_object(&source.bucket, &record).await,
        )?;
        OutputPersisted {
            bucket: &source.bucket,
            key: &record.key,
            size: record.body.len(),
        }
        .log();

        Ok(record.key)
    }
}
