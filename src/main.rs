// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::Context;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use docai_relay::backends::{DocumentAiClient, S3ObjectStore};
use docai_relay::config::HandlerConfig;
use docai_relay::pipeline::EventHandler;

/// Plain-text logs; the function runtime adds its own timestamps.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = HandlerConfig::from_env().context("Failed to load relay configuration")?;
    let extractor =
        DocumentAiClient::from_config(&config).context("Failed to create Document AI client")?;
    let store = S3ObjectStore::from_env().await;

    let handler = EventHandler::new(config, Arc::new(store), Arc::new(extractor));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let handler = handler.clone();
        async move { Ok::<_, Error>(handler.handle(&event.payload).await?) }
    }))
    .await
}
