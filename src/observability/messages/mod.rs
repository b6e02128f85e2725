// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Organization
//!
//! * `invocation` - handler lifecycle (start, completion, step failure)
//! * `pipeline` - progress through the intake steps
//! * `backend` - remote service and credential events

use tracing::Span;

pub mod backend;
pub mod invocation;
pub mod pipeline;

/// A message that knows how to emit itself as a structured tracing event.
pub trait StructuredLog {
    /// Emit the message at its documented level with structured fields.
    fn log(&self);

    /// Open a span carrying the message's identifying fields.
    fn span(&self, name: &str) -> Span;
}
