//! Example: invoke an axum router with a single gateway event
//!
//! Reads a v1 or v2 event from a file (or stdin), runs it through the adapter
//! and prints the response envelope as JSON.
//!
//! Run with:
//!   cargo run --bin invoke -- ../gateway-bridge/tests/testdata/request-post-v1.json
//!   GATEWAY_BRIDGE_STAGE_PREFIX=dev cargo run --bin invoke -- event.json
//!   RUST_LOG=gateway_bridge=debug cargo run --bin invoke < event.json

use std::path::PathBuf;

use axum::body::Body;
use gateway_bridge::prelude::*;
use gateway_bridge_examples::{read_event, router};
use tower::{ServiceBuilder, ServiceExt};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let event = read_event(path.as_deref())?;

    let svc = ServiceBuilder::new()
        .layer(DebugLayer::new())
        .layer(AdapterLayer::<Body>::new(AdapterConfig::from_env()))
        .service(router());

    let envelope = svc.oneshot(event).await?;
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}
