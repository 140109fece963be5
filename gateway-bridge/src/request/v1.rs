//! v1 envelope decoding.
//!
//! URL: `{x-forwarded-proto|http}://{host}[:{x-forwarded-port}]{path}[?{query}]`,
//! where the port is dropped when it is the scheme's default.

use gateway_bridge_core::{
    DecodeError, EventV1, EventVersion, decode_body, encode_path, encode_query, header_value,
    project_headers,
};

use super::{
    GatewayRequest, HOST, RequestParts, X_FORWARDED_FOR, X_FORWARDED_PORT, X_FORWARDED_PROTO,
    assemble, parse_content_length,
};
use crate::context::InvocationContext;

const DEFAULT_SCHEME: &str = "http";

/// Decode a v1 event into a request.
///
/// The path is not stage-prefix stripped. It arrives percent-decoded, so it is
/// re-encoded for the URI while the context keeps it verbatim. The query is
/// re-encoded from `queryStringParameters` in key order.
pub fn decode_v1(event: EventV1) -> Result<GatewayRequest, DecodeError> {
    let scheme = header_value(&event.headers, X_FORWARDED_PROTO)
        .filter(|proto| !proto.is_empty())
        .unwrap_or(DEFAULT_SCHEME);
    let port = header_value(&event.headers, X_FORWARDED_PORT).unwrap_or("");
    let host = header_value(&event.headers, HOST).unwrap_or("");
    let authority = if host.is_empty() {
        String::new()
    } else {
        authority(scheme, host, port)
    };

    let mut path_and_query = encode_path(&event.path).into_owned();
    if let Some(query) = encode_query(&event.query_string_parameters)? {
        path_and_query.push('?');
        path_and_query.push_str(&query);
    }

    let content_length = parse_content_length(&event.headers)?;
    let remote_addr = header_value(&event.headers, X_FORWARDED_FOR)
        .unwrap_or("")
        .to_string();
    let headers = project_headers(&event.headers)?;
    let body = decode_body(event.body, event.is_base64_encoded)?;

    assemble(RequestParts {
        method: &event.http_method,
        scheme,
        authority,
        path_and_query,
        headers,
        body,
        context: InvocationContext {
            version: EventVersion::V1,
            remote_addr,
            request_uri: event.path,
            content_length,
            request_context: event.request_context,
            stage_variables: event.stage_variables,
        },
    })
}

/// Host with the port appended unless it is the scheme's default.
fn authority(scheme: &str, host: &str, port: &str) -> String {
    match (scheme, port) {
        (_, "") | ("http", "80") | ("https", "443") => host.to_string(),
        _ => format!("{host}:{port}"),
    }
}
