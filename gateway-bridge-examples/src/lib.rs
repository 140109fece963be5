use std::io::Read;
use std::path::Path;

use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use gateway_bridge::{InvocationContext, InvocationEvent};
use serde::Serialize;

/// Router shared by the example binaries.
///
/// - `GET /hello` - plain text greeting
/// - `POST /echo` - echoes the body back with the request content type
/// - `GET /whoami` - JSON view of the invocation context
/// - `GET /health` - JSON health status
pub fn router() -> Router {
    Router::new()
        .route("/hello", get(hello))
        .route("/echo", post(echo))
        .route("/whoami", get(whoami))
        .route("/health", get(health))
}

async fn hello() -> &'static str {
    "Hello, World!"
}

async fn echo(headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| header::HeaderValue::from_static("application/octet-stream"));
    (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body)
}

#[derive(Serialize)]
struct WhoAmI {
    version: &'static str,
    remote_addr: String,
    request_uri: String,
    request_id: String,
    stage: String,
}

async fn whoami(Extension(ctx): Extension<InvocationContext>) -> Json<WhoAmI> {
    Json(WhoAmI {
        version: ctx.version.as_str(),
        request_id: ctx.request_id().to_string(),
        stage: ctx.stage().to_string(),
        remote_addr: ctx.remote_addr,
        request_uri: ctx.request_uri,
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Read one invocation event from `path`, or from stdin when `path` is `None`
/// or `-`.
///
/// # Example
///
/// ```ignore
/// let event = gateway_bridge_examples::read_event(Some("event.json".as_ref()))?;
/// ```
pub fn read_event(path: Option<&Path>) -> anyhow::Result<InvocationEvent> {
    let payload = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)?,
        _ => {
            let mut payload = String::new();
            std::io::stdin().read_to_string(&mut payload)?;
            payload
        }
    };
    Ok(serde_json::from_str(&payload)?)
}
