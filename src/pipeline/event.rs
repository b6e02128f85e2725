// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{HandlerError, HandlerResult};

/// The object named by a storage notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub bucket: String,
    pub key: String,
}

#[derive(Deserialize)]
struct Notification {
    #[serde(rename = "Records", default)]
    records: Vec<Record>,
}

#[derive(Deserialize)]
struct Record {
    s3: Option<S3Entity>,
}

#[derive(Deserialize)]
struct S3Entity {
    bucket: Option<BucketEntity>,
    object: Option<ObjectEntity>,
}

#[derive(Deserialize)]
struct BucketEntity {
    name: Option<String>,
}

#[derive(Deserialize)]
struct ObjectEntity {
    key: Option<String>,
}

impl InboundEvent {
    /// Read bucket and key from `Records[0].s3` of a notification payload.
    ///
    /// Additional records are ignored. Keys are used verbatim.
    ///
    /// # Example
    /// ```
    /// use docai_relay::pipeline::event::InboundEvent;
    ///
    /// let event = serde_json::json!({
    ///     "Records": [{ "s3": { "bucket": { "name": "docs" }, "object": { "key": "invoice.pdf" } } }]
    /// });
    ///
    /// let inbound = InboundEvent::from_value(&event).unwrap();
    /// assert_eq!(inbound.bucket, "docs");
    /// assert_eq!(inbound.key, "invoice.pdf");
    /// ```
    pub fn from_value(event: &Value) -> HandlerResult<Self> {
        let notification = Notification::deserialize(event)
            .map_err(|e| HandlerError::MalformedEvent(format!("Unexpected event shape: {e}")))?;

        let record = notification
            .records
            .into_iter()
            .next()
            .ok_or_else(|| HandlerError::MalformedEvent("Event has no Records".to_string()))?;

        let s3 = record
            .s3
            .ok_or_else(|| HandlerError::MalformedEvent("Records[0] has no s3 entry".to_string()))?;

        let bucket = s3
            .bucket
            .and_then(|b| b.name)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| HandlerError::MalformedEvent("Records[0] has no bucket name".to_string()))?;

        let key = s3
            .object
            .and_then(|o| o.key)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| HandlerError::MalformedEvent("Records[0] has no object key".to_string()))?;

        Ok(Self { bucket, key })
    }
}
