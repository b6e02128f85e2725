// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::config::ServiceAccountKey;
use crate::errors::HandlerResult;
use crate::pipeline::request::ExtractionRequest;
use crate::pipeline::types::ExtractionResult;

/// Remote document-understanding service.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Submit one document and return its extracted text.
    ///
    /// Any remote failure, including a response without text, is an
    /// `ExtractionService` error.
    async fn process(
        &self,
        credentials: &ServiceAccountKey,
        request: &ExtractionRequest,
    ) -> HandlerResult<ExtractionResult>;

    fn name(&self) -> &'static str;
}
