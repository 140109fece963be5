//! Per-invocation context and adapter configuration.
//!
//! [`InvocationContext`] carries the parts of an invocation that have no
//! place in a plain [`http::Request`]: the peer address, the request URI as
//! the handler should see it, the declared content length and the envelope
//! metadata. It is stored in the request extensions by the decoders.

pub mod config;

use std::collections::BTreeMap;

use gateway_bridge_core::{EventVersion, RequestContext};
use http::Request;

pub use config::{AdapterConfig, STAGE_PREFIX_ENV};

/// Invocation metadata attached to every decoded request.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(req: Request<Body>) -> Response<Body> {
///     let ctx = InvocationContext::from_request(&req).unwrap();
///     tracing::info!(remote = %ctx.remote_addr, uri = %ctx.request_uri);
///     // ...
/// }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    /// Envelope shape the request was decoded from.
    pub version: EventVersion,
    /// `x-forwarded-for` header, verbatim (empty if absent).
    pub remote_addr: String,
    /// Path as the handler should route on: the v1 `path`, or the v2 raw
    /// path with the stage prefix removed. Never includes the query.
    pub request_uri: String,
    /// Declared `content-length`, if the envelope had one.
    pub content_length: Option<u64>,
    /// Gateway request context metadata.
    pub request_context: RequestContext,
    /// Gateway stage variables.
    pub stage_variables: BTreeMap<String, String>,
}

impl InvocationContext {
    /// Get the invocation context of a decoded request.
    pub fn from_request<B>(req: &Request<B>) -> Option<&Self> {
        req.extensions().get::<Self>()
    }

    /// Gateway-assigned request id (empty if the envelope had none).
    pub fn request_id(&self) -> &str {
        &self.request_context.request_id
    }

    /// Deployment stage name (empty if the envelope had none).
    pub fn stage(&self) -> &str {
        &self.request_context.stage
    }
}
