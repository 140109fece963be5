//! End-to-end invocations against an axum router, driven by recorded gateway
//! events in `tests/testdata`.

use std::path::PathBuf;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Response, StatusCode, header};
use axum::extract::Path;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use gateway_bridge::prelude::*;
use gateway_bridge::{ErrorKind, EventV1, EventVersion};
use serde_json::{Value, json};
use tower::{ServiceBuilder, ServiceExt};

fn load(name: &str) -> InvocationEvent {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/testdata")
        .join(name);
    let data = std::fs::read_to_string(&path).unwrap();
    serde_json::from_str(&data).unwrap()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

async fn inspect(
    Extension(ctx): Extension<InvocationContext>,
    req_headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    Json(json!({
        "host": header_str(&req_headers, "host"),
        "cookie": header_str(&req_headers, "cookie"),
        "remoteAddr": ctx.remote_addr,
        "requestUri": ctx.request_uri,
        "contentLength": ctx.content_length,
        "requestId": ctx.request_id(),
        "stage": ctx.stage(),
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn whoami(req: axum::http::Request<Body>) -> Json<Value> {
    let ctx = InvocationContext::from_request(&req).cloned().unwrap_or_default();
    Json(json!({
        "uri": req.uri().to_string(),
        "query": req.uri().query(),
        "cookie": header_str(req.headers(), "cookie"),
        "requestUri": ctx.request_uri,
        "stage": ctx.stage(),
        "requestId": ctx.request_id(),
        "sourceIp": ctx.request_context.http.source_ip,
    }))
}

async fn echo(req_headers: HeaderMap, body: Bytes) -> Response<Body> {
    let mut builder = Response::builder().status(StatusCode::OK);
    if let Some(content_type) = req_headers.get(header::CONTENT_TYPE) {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(body)).unwrap()
}

async fn vary() -> Response<Body> {
    Response::builder()
        .status(StatusCode::ACCEPTED)
        .header(header::VARY, "accept")
        .header(header::VARY, "origin")
        .body(Body::from("ok"))
        .unwrap()
}

async fn file(Path(name): Path<String>, Extension(ctx): Extension<InvocationContext>) -> Json<Value> {
    Json(json!({ "name": name, "requestUri": ctx.request_uri }))
}

fn router() -> Router {
    Router::new()
        .route("/files/{name}", get(file))
        .route("/graphql", post(inspect))
        .route("/whoami", get(whoami))
        .route("/echo", post(echo))
        .route("/vary", get(vary))
}

fn adapter(config: AdapterConfig) -> Adapter<Router, Body> {
    Adapter::with_config(router(), config)
}

fn json_body(envelope: &OutgoingEnvelope) -> Value {
    serde_json::from_slice(&envelope.body_bytes().unwrap()).unwrap()
}

#[tokio::test]
async fn test_v1_post_graphql() {
    let envelope = adapter(AdapterConfig::new())
        .oneshot(load("request-post-v1.json"))
        .await
        .unwrap();

    assert_eq!(envelope.status_code, 200);
    assert_eq!(envelope.header("content-type"), Some("application/json"));
    assert!(envelope.is_base64_encoded);

    let body = json_body(&envelope);
    assert_eq!(
        body["host"],
        "dev-d-loadb-1xcoy0h9gw154-247507225.us-west-2.elb.amazonaws.com"
    );
    assert_eq!(body["remoteAddr"], "73.189.109.118");
    assert_eq!(body["requestUri"], "/graphql");
    assert_eq!(body["contentLength"], 4);
    assert_eq!(body["body"], "test");
    assert_eq!(body["cookie"], Value::Null);
}

#[tokio::test]
async fn test_v2_stage_prefix_query_and_cookies() {
    let envelope = adapter(AdapterConfig::new().stage_prefix("dev"))
        .oneshot(load("request-get-v2.json"))
        .await
        .unwrap();

    assert_eq!(envelope.status_code, 200);

    let body = json_body(&envelope);
    assert_eq!(
        body["uri"],
        "http://r3pmxmplak.execute-api.us-east-2.amazonaws.com/whoami?lang=en&tag=a&tag=b"
    );
    assert_eq!(body["query"], "lang=en&tag=a&tag=b");
    assert_eq!(body["cookie"], "session=abc123;theme=dark");
    assert_eq!(body["requestUri"], "/whoami");
    assert_eq!(body["stage"], "dev");
    assert_eq!(body["requestId"], "JKJaXmPLvHcESHA=");
    assert_eq!(body["sourceIp"], "205.255.255.176");
}

#[tokio::test]
async fn test_v2_without_prefix_is_not_routed() {
    let envelope = adapter(AdapterConfig::new())
        .oneshot(load("request-get-v2.json"))
        .await
        .unwrap();

    assert_eq!(envelope.status_code, 404);
    assert_eq!(envelope.body, "");
    assert!(!envelope.is_base64_encoded);
}

#[tokio::test]
async fn test_v2_base64_body_round_trip() {
    let envelope = adapter(AdapterConfig::new().stage_prefix_segments(["dev"]))
        .oneshot(load("request-post-v2-base64.json"))
        .await
        .unwrap();

    assert_eq!(envelope.status_code, 200);
    assert_eq!(envelope.header("Content-Type"), Some("application/json"));
    assert_eq!(envelope.body, "eyJoZWxsbyI6IndvcmxkIn0=");
    assert!(envelope.is_base64_encoded);
}

#[tokio::test]
async fn test_multi_value_response_headers_joined() {
    let envelope = adapter(AdapterConfig::new())
        .oneshot(v1_get("/vary", &[("host", "example.com")]))
        .await
        .unwrap();

    assert_eq!(envelope.status_code, 202);
    assert_eq!(envelope.headers["vary"], "accept,origin");
    assert_eq!(&envelope.body_bytes().unwrap()[..], b"ok");
}

fn v1_get(path: &str, headers: &[(&str, &str)]) -> InvocationEvent {
    InvocationEvent::V1(EventV1 {
        http_method: "GET".into(),
        path: path.into(),
        headers: headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        ..Default::default()
    })
}

#[tokio::test]
async fn test_v1_decoded_path_with_space_routes() {
    let event = v1_get("/files/annual report.pdf", &[("host", "example.com")]);

    let envelope = adapter(AdapterConfig::new()).oneshot(event).await.unwrap();

    assert_eq!(envelope.status_code, 200);
    let body = json_body(&envelope);
    assert_eq!(body["name"], "annual report.pdf");
    assert_eq!(body["requestUri"], "/files/annual report.pdf");
}

#[tokio::test]
async fn test_v2_raw_path_with_space_routes() {
    let mut event = load("request-get-v2.json");
    if let InvocationEvent::V2(event) = &mut event {
        event.raw_path = "/dev/files/a b".into();
    }

    let envelope = adapter(AdapterConfig::new().stage_prefix("dev"))
        .oneshot(event)
        .await
        .unwrap();

    assert_eq!(envelope.status_code, 200);
    assert_eq!(json_body(&envelope)["name"], "a b");
}

#[tokio::test]
async fn test_v1_without_host_routes() {
    let envelope = adapter(AdapterConfig::new())
        .oneshot(v1_get("/whoami", &[]))
        .await
        .unwrap();

    assert_eq!(envelope.status_code, 200);
    let body = json_body(&envelope);
    assert_eq!(body["uri"], "/whoami");
    assert_eq!(body["requestUri"], "/whoami");
}

#[tokio::test]
async fn test_debug_layer_stack() {
    let svc = ServiceBuilder::new()
        .layer(DebugLayer::new())
        .layer(AdapterLayer::<Body>::new(AdapterConfig::new().stage_prefix("/dev")))
        .service(router());

    let envelope = svc.oneshot(load("request-post-v2-base64.json")).await.unwrap();
    assert_eq!(envelope.status_code, 200);
    assert_eq!(envelope.body, "eyJoZWxsbyI6IndvcmxkIn0=");
}

#[tokio::test]
async fn test_invalid_content_length_fails_invocation() {
    let mut event = load("request-post-v1.json");
    if let InvocationEvent::V1(event) = &mut event {
        event
            .headers
            .insert("content-length".into(), "four".into());
    }

    let err = adapter(AdapterConfig::new()).oneshot(event).await.unwrap_err();
    assert_eq!(err.decode_kind(), Some(ErrorKind::ContentLength));
    assert!(!err.is_handler());
}

#[tokio::test]
async fn test_invalid_base64_fails_invocation() {
    let mut event = load("request-post-v2-base64.json");
    if let InvocationEvent::V2(event) = &mut event {
        event.body = "{not base64}".into();
    }

    let err = adapter(AdapterConfig::new()).oneshot(event).await.unwrap_err();
    assert_eq!(err.decode_kind(), Some(ErrorKind::BodyDecode));
}

#[test]
fn test_fixture_versions() {
    assert_eq!(load("request-post-v1.json").version(), EventVersion::V1);
    assert_eq!(load("request-get-v2.json").version(), EventVersion::V2);
}
