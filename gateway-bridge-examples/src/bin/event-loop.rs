//! Example: a minimal host loop
//!
//! Reads newline-delimited events from stdin and writes one envelope per line
//! to stdout, the way a serverless runtime shim drives the adapter. A failed
//! invocation is reported on stderr and the loop moves on.
//!
//! Run with:
//!   cat events.ndjson | cargo run --bin event-loop

use axum::Router;
use axum::body::Body;
use gateway_bridge::prelude::*;
use gateway_bridge_examples::router;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tower::ServiceExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let adapter: Adapter<Router, Body> = Adapter::with_config(router(), AdapterConfig::from_env());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let event: InvocationEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(err) => {
                tracing::error!(error = %err, "invalid event payload");
                continue;
            }
        };

        match adapter.clone().oneshot(event).await {
            Ok(envelope) => {
                let mut out = serde_json::to_vec(&envelope)?;
                out.push(b'\n');
                stdout.write_all(&out).await?;
                stdout.flush().await?;
            }
            Err(err) => tracing::error!(error = %err, "invocation failed"),
        }
    }

    Ok(())
}
