//! v2 envelope decoding.
//!
//! URL: `http://{requestContext.domainName}{rawPath - prefix}[?{rawQueryString}]`.
//! The scheme is fixed; this URL is an internal representation, not the
//! client-facing one.

use gateway_bridge_core::{
    DecodeError, EventV2, EventVersion, StagePrefix, decode_body, escape_raw_path, fold_cookies,
    header_value, project_headers, raw_query,
};

use super::{GatewayRequest, RequestParts, X_FORWARDED_FOR, assemble, parse_content_length};
use crate::context::InvocationContext;

const SCHEME: &str = "http";

/// Decode a v2 event into a request.
///
/// The stage prefix is stripped from `rawPath`, `rawQueryString` is appended
/// as received, and the cookie list is folded into a `Cookie` header.
pub fn decode_v2(event: EventV2, prefix: &StagePrefix) -> Result<GatewayRequest, DecodeError> {
    let path = prefix.strip(&event.raw_path).to_string();

    let mut path_and_query = escape_raw_path(&path).into_owned();
    if let Some(query) = raw_query(&event.raw_query_string) {
        path_and_query.push('?');
        path_and_query.push_str(query);
    }

    let content_length = parse_content_length(&event.headers)?;
    let remote_addr = header_value(&event.headers, X_FORWARDED_FOR)
        .unwrap_or("")
        .to_string();
    let mut headers = project_headers(&event.headers)?;
    fold_cookies(&mut headers, &event.cookies)?;
    let body = decode_body(event.body, event.is_base64_encoded)?;

    let method = event.request_context.http.method.clone();
    let authority = event.request_context.domain_name.clone();
    assemble(RequestParts {
        method: &method,
        scheme: SCHEME,
        authority,
        path_and_query,
        headers,
        body,
        context: InvocationContext {
            version: EventVersion::V2,
            remote_addr,
            request_uri: path,
            content_length,
            request_context: event.request_context,
            stage_variables: event.stage_variables,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_bridge_core::ErrorKind;
    use http::Method;

    fn event(method: &str, raw_path: &str) -> EventV2 {
        let mut event = EventV2 {
            raw_path: raw_path.into(),
            ..Default::default()
        };
        event.request_context.domain_name = "example.com".into();
        event.request_context.http.method = method.into();
        event
    }

    #[test]
    fn test_strip_prefix_and_cookies() {
        let mut ev = event("GET", "/dev/abc");
        ev.cookies = vec!["abc=123".into()];

        let req = decode_v2(ev, &StagePrefix::new("/dev")).unwrap();

        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.uri().path(), "/abc");
        assert_eq!(req.uri().host(), Some("example.com"));
        assert_eq!(req.headers().get("cookie").unwrap(), "abc=123");

        let ctx = InvocationContext::from_request(&req).unwrap();
        assert_eq!(ctx.request_uri, "/abc");
        assert_eq!(ctx.version, EventVersion::V2);
    }

    #[test]
    fn test_empty_cookie_header_present() {
        let req = decode_v2(event("GET", "/abc"), &StagePrefix::default()).unwrap();

        let cookies: Vec<_> = req.headers().get_all("cookie").iter().collect();
        assert_eq!(cookies, vec![""]);
    }

    #[test]
    fn test_non_matching_prefix_unchanged() {
        let req = decode_v2(event("GET", "/other"), &StagePrefix::new("/dev")).unwrap();
        assert_eq!(req.uri().path(), "/other");
    }

    #[test]
    fn test_whole_path_is_prefix() {
        let req = decode_v2(event("GET", "/dev"), &StagePrefix::new("/dev")).unwrap();
        assert_eq!(req.uri().path(), "/");

        let ctx = InvocationContext::from_request(&req).unwrap();
        assert_eq!(ctx.request_uri, "");
    }

    #[test]
    fn test_raw_query_passed_through() {
        let mut ev = event("GET", "/search");
        ev.raw_query_string = "z=1&a=%2F&a=2".into();

        let req = decode_v2(ev, &StagePrefix::default()).unwrap();

        assert_eq!(req.uri().query(), Some("z=1&a=%2F&a=2"));
        let ctx = InvocationContext::from_request(&req).unwrap();
        assert_eq!(ctx.request_uri, "/search");
    }

    #[test]
    fn test_raw_path_with_space_is_escaped() {
        let req = decode_v2(event("GET", "/dev/a b"), &StagePrefix::new("dev")).unwrap();

        assert_eq!(req.uri().path(), "/a%20b");
        let ctx = InvocationContext::from_request(&req).unwrap();
        assert_eq!(ctx.request_uri, "/a b");
    }

    #[test]
    fn test_raw_path_escapes_kept() {
        let req = decode_v2(event("GET", "/a%20b"), &StagePrefix::default()).unwrap();
        assert_eq!(req.uri().path(), "/a%20b");
    }

    #[test]
    fn test_empty_domain_still_routes() {
        let mut ev = event("GET", "/abc");
        ev.request_context.domain_name.clear();
        ev.raw_query_string = "x=1".into();

        let req = decode_v2(ev, &StagePrefix::default()).unwrap();

        assert_eq!(req.uri().host(), None);
        assert_eq!(req.uri().path(), "/abc");
        assert_eq!(req.uri().query(), Some("x=1"));
    }

    #[test]
    fn test_empty_raw_query_omitted() {
        let req = decode_v2(event("GET", "/search"), &StagePrefix::default()).unwrap();
        assert_eq!(req.uri().to_string(), "http://example.com/search");
    }

    #[test]
    fn test_scheme_is_http() {
        let mut ev = event("GET", "/");
        ev.headers.insert("x-forwarded-proto".into(), "https".into());
        ev.headers.insert("x-forwarded-port".into(), "443".into());

        let req = decode_v2(ev, &StagePrefix::default()).unwrap();
        assert_eq!(req.uri().scheme_str(), Some("http"));
        assert_eq!(req.uri().port_u16(), None);
    }

    #[test]
    fn test_content_length_and_remote_addr() {
        let mut ev = event("POST", "/upload");
        ev.headers.insert("content-length".into(), "11".into());
        ev.headers.insert("x-forwarded-for".into(), "10.0.0.1, 10.0.0.2".into());
        ev.body = "aGVsbG8gd29ybGQ=".into();
        ev.is_base64_encoded = true;

        let req = decode_v2(ev, &StagePrefix::default()).unwrap();

        assert_eq!(req.body().as_ref(), b"hello world");
        let ctx = InvocationContext::from_request(&req).unwrap();
        assert_eq!(ctx.content_length, Some(11));
        assert_eq!(ctx.remote_addr, "10.0.0.1, 10.0.0.2");
    }

    #[test]
    fn test_invalid_content_length() {
        let mut ev = event("POST", "/");
        ev.headers.insert("content-length".into(), "-4".into());

        let err = decode_v2(ev, &StagePrefix::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ContentLength);
    }

    #[test]
    fn test_invalid_base64_body() {
        let mut ev = event("POST", "/");
        ev.body = "not*base64".into();
        ev.is_base64_encoded = true;

        let err = decode_v2(ev, &StagePrefix::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BodyDecode);
    }

    #[test]
    fn test_plain_body() {
        let mut ev = event("POST", "/");
        ev.body = "{\"a\":1}".into();

        let req = decode_v2(ev, &StagePrefix::default()).unwrap();
        assert_eq!(req.body().as_ref(), b"{\"a\":1}");
    }
}
