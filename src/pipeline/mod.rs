// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Document intake pipeline.
//!
//! One storage notification flows through these steps:
//!
//! ```text
//! event → fetch source → collect bytes → resolve MIME type
//!       → build request → extract text → derive output key → persist
//! ```
//!
//! The pure pieces (`mime`, `output_key`, `request`, `event`) carry all of the
//! decision logic; [`handler::EventHandler`] sequences them around the
//! storage and extraction clients.

pub mod collector;
pub mod event;
pub mod handler;
pub mod mime;
pub mod output_key;
pub mod request;
pub mod types;

pub use event::InboundEvent;
pub use handler::{EventHandler, Step};
pub use request::ExtractionRequest;
pub use types::{DocumentPayload, ExtractionResult, HandlerResponse, OutputRecord};
