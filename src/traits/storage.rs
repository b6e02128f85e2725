// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::errors::HandlerResult;
use crate::pipeline::types::OutputRecord;

/// Lazily produced body of a stored object.
pub type ObjectBody = BoxStream<'static, std::io::Result<Bytes>>;

/// Object storage as seen by the handler: read one object, write one object.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Open the body of `bucket/key`.
    ///
    /// Fails with `NotFound` when the object does not exist and
    /// `StorageAccess` for any other read failure.
    async fn get_object(&self, bucket: &str, key: &str) -> HandlerResult<ObjectBody>;

    /// Write `record` into `bucket`, replacing any existing object.
    async fn put_object(&self, bucket: &str, record: &OutputRecord) -> HandlerResult<()>;

    fn name(&self) -> &'static str;
}
