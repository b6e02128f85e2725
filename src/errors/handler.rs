// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error type for a single handler invocation.
//!
//! Every variant aborts the invocation. Nothing is retried locally; the error
//! propagates to the function runtime, which owns retry and dead-letter policy.

use thiserror::Error;

/// Failure of one step of the intake pipeline.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The trigger payload did not have the expected storage-notification shape.
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    /// Processor identity or credentials are missing or unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The source object does not exist.
    #[error("Object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// The source object could not be read for any other reason.
    #[error("Failed to read s3://{bucket}/{key}: {reason}")]
    StorageAccess {
        bucket: String,
        key: String,
        reason: String,
    },

    /// The object body stream ended with a transport error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote extraction call failed or returned an unusable result.
    #[error("Extraction service error: {0}")]
    ExtractionService(String),

    /// The extracted text could not be written back.
    #[error("Failed to write s3://{bucket}/{key}: {reason}")]
    StorageWrite {
        bucket: String,
        key: String,
        reason: String,
    },
}

impl HandlerError {
    /// Taxonomy name used as the `error_kind` field in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerError::MalformedEvent(_) => "MalformedEventError",
            HandlerError::Configuration(_) => "ConfigurationError",
            HandlerError::NotFound { .. } => "NotFoundError",
            HandlerError::StorageAccess { .. } => "StorageAccessError",
            HandlerError::Io(_) => "IOError",
            HandlerError::ExtractionService(_) => "ExtractionServiceError",
            HandlerError::StorageWrite { .. } => "StorageWriteError",
        }
    }
}

/// Result type alias for pipeline operations.
pub type HandlerResult<T> = Result<T, HandlerError>;
