// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Storage and extraction backends.
//!
//! Each backend implements one of the seams in [`crate::traits`] so the
//! pipeline never talks to a cloud SDK directly.
//!
//! # Available Backends
//!
//! ## Object storage
//! - **S3ObjectStore**: Amazon S3 via the AWS SDK; used by the deployed function
//! - **InMemoryObjectStore**: process-local map with switchable failures; used
//!   by local runs and tests
//!
//! ## Extraction
//! - **DocumentAiClient**: Document AI `process` over REST, authenticated with
//!   a service-account token from [`auth`]
//!
//! ## Stub Backend (Test-Only)
//! - **StubExtractor**: returns fixed text and records requests
//! - **FailingExtractor**: always fails with an extraction error
//! - **BrokenStreamStore**: serves a body that breaks mid-stream
//! - **Note**: NOT available in production builds
//!
//! # Example
//! ```rust
//! use docai_relay::backends::InMemoryObjectStore;
//! use docai_relay::traits::ObjectStore;
//!
//! let store = InMemoryObjectStore::new();
//! store.insert("docs", "invoice.pdf", &b"%PDF-1.7"[..]);
//! assert_eq!(store.name(), "in_memory");
//! assert!(store.get("docs", "invoice.pdf").is_some());
//! ```

pub mod auth;
pub mod document_ai;
pub mod memory;
pub mod s3;
#[cfg(test)]
pub mod stub;

pub use document_ai::DocumentAiClient;
pub use memory::{InMemoryObjectStore, StoredObject};
pub use s3::S3ObjectStore;
