// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::errors::{HandlerError, HandlerResult};
use crate::pipeline::types::OutputRecord;
use crate::traits::{ObjectBody, ObjectStore};

/// A stored object: body plus content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: Option<String>,
}

/// Object store held in process memory.
///
/// Used for local runs and tests. Bodies are served in fixed-size chunks so
/// callers see a real multi-chunk stream. Reads and writes can be switched to
/// fail.
pub struct InMemoryObjectStore {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    chunk_size: usize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::with_chunk_size(64 * 1024)
    }

    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            chunk_size: chunk_size.max(1),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    /// Seed an object.
    pub fn insert(&self, bucket: &str, key: &str, body: impl Into<Bytes>) {
        self.lock().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body: body.into(),
                content_type: None,
            },
        );
    }

    /// Look up an object.
    pub fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.lock()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Number of successful `put_object` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), StoredObject>> {
        // A poisoned map is still structurally valid; keep serving it.
        self.objects.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> HandlerResult<ObjectBody> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(HandlerError::StorageAccess {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: "reads disabled".to_string(),
            });
        }

        let object = self.get(bucket, key).ok_or_else(|| HandlerError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })?;

        let chunks: Vec<std::io::Result<Bytes>> = object
            .body
            .chunks(self.chunk_size)
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
            .collect();

        Ok(stream::iter(chunks).boxed())
    }

    async fn put_object(&self, bucket: &str, record: &OutputRecord) -> HandlerResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(HandlerError::StorageWrite {
                bucket: bucket.to_string(),
                key: record.key.clone(),
                reason: "writes disabled".to_string(),
            });
        }

        self.lock().insert(
            (bucket.to_string(), record.key.clone()),
            StoredObject {
                body: Bytes::from(record.body.clone()),
                content_type: Some(record.content_type.to_string()),
            },
        );
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}
