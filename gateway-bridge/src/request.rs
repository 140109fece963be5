//! Event decoding: invocation envelope → canonical HTTP request.
//!
//! [`decode`] is the single dispatch point. It matches on the envelope shape
//! and hands the event to the v1 or v2 decoder, which both finish through
//! [`assemble`] so method, URL and extension handling stay identical.

mod v1;
mod v2;

use std::collections::BTreeMap;

use bytes::Bytes;
use gateway_bridge_core::{DecodeError, InvocationEvent, header_value};
use http::{HeaderMap, Method, Request, Uri};

use crate::context::{AdapterConfig, InvocationContext};

pub use v1::decode_v1;
pub use v2::decode_v2;

/// Request type handed to handlers before body conversion.
pub type GatewayRequest = Request<Bytes>;

pub(crate) const HOST: &str = "host";
pub(crate) const CONTENT_LENGTH: &str = "content-length";
pub(crate) const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub(crate) const X_FORWARDED_PORT: &str = "x-forwarded-port";
pub(crate) const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Decode an invocation event into a request.
///
/// v2 events (`"version": "2.0"`) go to [`decode_v2`] with the configured
/// stage prefix; everything else goes to [`decode_v1`].
///
/// # Errors
/// Returns a [`DecodeError`] if the content length, body or assembled request
/// is invalid.
pub fn decode(event: InvocationEvent, config: &AdapterConfig) -> Result<GatewayRequest, DecodeError> {
    match event {
        InvocationEvent::V2(event) => {
            tracing::debug!(target: "gateway_bridge", version = "2.0", raw_path = %event.raw_path, "decoding event");
            decode_v2(event, config.get_stage_prefix())
        }
        InvocationEvent::V1(event) => {
            tracing::debug!(target: "gateway_bridge", version = "1.0", path = %event.path, "decoding event");
            decode_v1(event)
        }
    }
}

/// Parse the declared `content-length`, if any.
///
/// # Errors
/// Returns [`DecodeError::ContentLength`] if the header is present but not a
/// non-negative base-10 integer.
pub(crate) fn parse_content_length(
    headers: &BTreeMap<String, String>,
) -> Result<Option<u64>, DecodeError> {
    let Some(value) = header_value(headers, CONTENT_LENGTH) else {
        return Ok(None);
    };

    value
        .parse::<u64>()
        .map(Some)
        .map_err(|source| DecodeError::ContentLength {
            value: value.to_string(),
            source,
        })
}

/// Parse a method token; an empty method means `GET`.
pub(crate) fn parse_method(method: &str) -> Result<Method, DecodeError> {
    if method.is_empty() {
        return Ok(Method::GET);
    }
    Method::from_bytes(method.as_bytes()).map_err(DecodeError::request)
}

/// Parts gathered by a decoder before the request is built.
pub(crate) struct RequestParts<'a> {
    pub method: &'a str,
    pub scheme: &'a str,
    /// `host[:port]`; empty when the envelope names no host.
    pub authority: String,
    /// Escaped path plus optional `?query`.
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub context: InvocationContext,
}

/// Build the request from decoded parts.
///
/// Without an authority the URI is origin-form (`/path?query`) so the request
/// still routes.
pub(crate) fn assemble(parts: RequestParts<'_>) -> Result<GatewayRequest, DecodeError> {
    let method = parse_method(parts.method)?;
    let uri = build_uri(parts.scheme, &parts.authority, parts.path_and_query)?;

    let mut req = Request::new(parts.body);
    *req.method_mut() = method;
    *req.uri_mut() = uri;
    *req.headers_mut() = parts.headers;
    req.extensions_mut().insert(parts.context);

    Ok(req)
}

fn build_uri(scheme: &str, authority: &str, mut path_and_query: String) -> Result<Uri, DecodeError> {
    if !path_and_query.starts_with('/') {
        path_and_query.insert(0, '/');
    }

    let builder = if authority.is_empty() {
        Uri::builder()
    } else {
        Uri::builder().scheme(scheme).authority(authority)
    };

    builder
        .path_and_query(path_and_query.as_str())
        .build()
        .map_err(|err| DecodeError::request(format!("{err}: {scheme}://{authority}{path_and_query}")))
}
