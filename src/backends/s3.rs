// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use futures::stream::{self, StreamExt};

use crate::errors::{HandlerError, HandlerResult};
use crate::pipeline::types::OutputRecord;
use crate::traits::{ObjectBody, ObjectStore};

/// Amazon S3 through the AWS SDK.
///
/// Object bodies are handed out as a chunk stream; chunk failures surface as
/// `std::io::Error` so the collector can report them as I/O errors.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// Build a client from the ambient AWS configuration (env, profile, role).
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_s3::Client::new(&config))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> HandlerResult<ObjectBody> {
        let output = match self.client.get_object().bucket(bucket).key(key).send().await {
            Ok(output) => output,
            Err(err) => {
                let reason = DisplayErrorContext(&err).to_string();
                if err.into_service_error().is_no_such_key() {
                    return Err(HandlerError::NotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    });
                }
                return Err(HandlerError::StorageAccess {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    reason,
                });
            }
        };

        let chunks = stream::unfold(output.body, |mut body| async move {
            body.next()
                .await
                .map(|chunk| (chunk.map_err(std::io::Error::other), body))
        });

        Ok(chunks.boxed())
    }

    async fn put_object(&self, bucket: &str, record: &OutputRecord) -> HandlerResult<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(&record.key)
            .body(ByteStream::from(record.body.clone().into_bytes()))
            .content_type(record.content_type)
            .send()
            .await
            .map_err(|err| HandlerError::StorageWrite {
                bucket: bucket.to_string(),
                key: record.key.clone(),
                reason: DisplayErrorContext(&err).to_string(),
            })?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "s3"
    }
}
