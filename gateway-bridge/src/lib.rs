//! # Gateway Bridge
//!
//! Run ordinary [tower](https://github.com/tower-rs/tower) and
//! [Axum](https://github.com/tokio-rs/axum) HTTP services behind a serverless
//! API gateway.
//!
//! The gateway delivers each HTTP request as a JSON invocation envelope and
//! expects a JSON response envelope back. This crate converts between the two
//! so handlers only ever see `http::Request` and produce `http::Response`.
//!
//! ## Features
//!
//! - **Both envelope shapes:** v1 (REST-style, `httpMethod`/`path`) and v2
//!   (`"version": "2.0"`, `rawPath`/`rawQueryString`/`cookies`) are decoded
//!   into the same canonical request.
//! - **Tower-native:** [`Adapter`] is a `Service<InvocationEvent>` wrapping any
//!   `Service<Request<B>>`, so an Axum `Router` plugs in directly.
//! - **Stage prefixes:** v2 paths have a configurable deployment-stage prefix
//!   stripped before routing (see [`AdapterConfig`]).
//! - **Invocation metadata:** the peer address, routed URI and gateway request
//!   context reach handlers through [`InvocationContext`] in the request
//!   extensions.
//! - **Debugging:** [`DebugLayer`] dumps every event and envelope through
//!   `tracing`.
//!
//! ## Getting Started
//!
//! ```rust,ignore
//! use axum::{Router, body::Body, routing::get};
//! use gateway_bridge::prelude::*;
//! use tower::ServiceExt;
//!
//! let router = Router::new().route("/hello", get(|| async { "hello" }));
//! let adapter: Adapter<Router, Body> = Adapter::with_config(router, AdapterConfig::from_env());
//!
//! let event: InvocationEvent = serde_json::from_str(&payload)?;
//! let envelope = adapter.oneshot(event).await?;
//! println!("{}", serde_json::to_string(&envelope)?);
//! ```
//!
//! The `gateway-bridge-examples` crate has a runnable version of this.

pub mod adapter;
pub mod context;
pub mod error;
pub mod layer;
pub mod request;
pub mod response;

pub use adapter::{Adapter, AdapterLayer};
pub use context::{AdapterConfig, InvocationContext, STAGE_PREFIX_ENV};
pub use error::{BoxError, BridgeError};
pub use layer::{DebugLayer, DebugService};
pub use request::{GatewayRequest, decode, decode_v1, decode_v2};
pub use response::{ResponseBuffer, encode_response};

// Re-export the wire types
pub use gateway_bridge_core::{
    DecodeError, ErrorKind, EventV1, EventV2, EventVersion, HttpDescription, InvocationEvent,
    OutgoingEnvelope, RequestContext, StagePrefix,
};

// Re-export several crates
pub use gateway_bridge_core;
pub use http;

pub mod prelude {
    //! A prelude for `gateway-bridge` providing the most common types.
    pub use crate::adapter::{Adapter, AdapterLayer};
    pub use crate::context::{AdapterConfig, InvocationContext};
    pub use crate::error::BridgeError;
    pub use crate::layer::DebugLayer;
    pub use gateway_bridge_core::{InvocationEvent, OutgoingEnvelope};
}
