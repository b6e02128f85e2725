// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! All diagnostic and operational log lines of the relay are produced through
//! message types in [`messages`]. Each type implements `Display` for the human
//! readable line and [`messages::StructuredLog`] for emitting the same event
//! with typed fields, so log queries can filter on `bucket`, `key`,
//! `error_kind` and friends instead of parsing text.
//!
//! Document contents, credentials and access tokens are never part of a
//! message; sizes and identifiers are.
//!
//! # Usage
//!
//! ```rust
//! use docai_relay::observability::messages::{invocation::InvocationStarted, StructuredLog};
//!
//! let msg = InvocationStarted {
//!     bucket: "docs",
//!     key: "invoice.pdf",
//! };
//!
//! msg.log();
//! ```

pub mod messages;
