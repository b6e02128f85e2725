// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Run the handler once against a local file.
//!
//! ```text
//! cargo run --example local_invoke -- <path/to/document> [object-key]
//! ```
//!
//! The file is seeded into an in-memory bucket and sent to the real Document
//! AI processor named by `GOOGLE_PROJECT_ID`, `GOOGLE_LOCATION` and
//! `GOOGLE_PROCESSOR_ID`, authenticated with `GOOGLE_CREDENTIALS` or
//! `GOOGLE_APPLICATION_CREDENTIALS`.

use serde_json::json;
use std::env;
use std::path::Path;
use std::sync::Arc;

use docai_relay::backends::{DocumentAiClient, InMemoryObjectStore};
use docai_relay::config::HandlerConfig;
use docai_relay::pipeline::output_key::derive_output_key;
use docai_relay::pipeline::EventHandler;

const LOCAL_BUCKET: &str = "local";

async fn run_local_invoke(path: &Path, key: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== docai-relay local invoke ===\n");

    let bytes = std::fs::read(path)?;
    println!("Source: {} ({} bytes)", path.display(), bytes.len());
    println!("Object: s3://{LOCAL_BUCKET}/{key}");

    let config = HandlerConfig::from_env()?;
    let extractor = DocumentAiClient::from_config(&config)?;
    let store = Arc::new(InMemoryObjectStore::new());
    store.insert(LOCAL_BUCKET, key, bytes);

    let handler = EventHandler::new(config, store.clone(), Arc::new(extractor));
    let event = json!({
        "Records": [{ "s3": { "bucket": { "name": LOCAL_BUCKET }, "object": { "key": key } } }]
    });

    let response = handler.handle(&event).await?;
    println!("Response: {}", serde_json::to_string_pretty(&response)?);

    let output_key = derive_output_key(key);
    if let Some(saved) = store.get(LOCAL_BUCKET, &output_key) {
        println!("\n--- {output_key} ---");
        println!("{}", String::from_utf8_lossy(&saved.body));
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <path/to/document> [object-key]", args[0]);
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let key = match args.get(2) {
        Some(key) => key.clone(),
        None => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| args[1].clone()),
    };

    if let Err(e) = run_local_invoke(path, &key).await {
        eprintln!("Local invoke failed: {e}");
        std::process::exit(1);
    }
}
