//! Header projection between envelope maps and multi-value header sets.
//!
//! Envelopes carry headers as one string per name; several logical values are
//! joined with commas. Inside the adapter headers are a [`HeaderMap`], so the
//! comma convention only exists here:
//!
//! - [`project_headers`]: envelope map → `HeaderMap` (split on commas after the first byte)
//! - [`fold_cookies`]: v2 cookie list → single `Cookie` header
//! - [`flatten_headers`]: `HeaderMap` → envelope map (join with commas)
//!
//! Splitting then joining is lossy: a single value that contained a literal
//! comma comes back out as several values joined with commas, which reads the
//! same on the wire.

use std::collections::BTreeMap;

use http::header::{COOKIE, HeaderMap, HeaderName, HeaderValue};

use crate::error::DecodeError;

/// Separator used to join cookies into one `Cookie` header.
pub const COOKIE_SEPARATOR: &str = ";";

/// Look up a header in an envelope map, ignoring ASCII case.
///
/// An exact match wins over a case-insensitive one.
pub fn header_value<'a>(headers: &'a BTreeMap<String, String>, name: &str) -> Option<&'a str> {
    if let Some(value) = headers.get(name) {
        return Some(value.as_str());
    }

    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Expand an envelope header map into a multi-value header set.
///
/// A value containing a comma after its first byte is split and every piece is
/// appended as its own value. Any other value, including one that starts with a
/// comma, replaces whatever the set already holds for that name.
///
/// # Errors
/// Returns [`DecodeError::RequestConstruction`] for a name or value that is not
/// a legal HTTP header.
pub fn project_headers(headers: &BTreeMap<String, String>) -> Result<HeaderMap, DecodeError> {
    let mut map = HeaderMap::with_capacity(headers.len());

    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())?;

        if value.find(',').is_some_and(|at| at > 0) {
            for part in value.split(',') {
                map.append(name.clone(), HeaderValue::from_str(part)?);
            }
            continue;
        }

        map.insert(name, HeaderValue::from_str(value)?);
    }

    Ok(map)
}

/// Fold a cookie list into a single `Cookie` header.
///
/// The header is always added, even for an empty list, so handlers that read
/// `Cookie` unconditionally find one.
pub fn fold_cookies(map: &mut HeaderMap, cookies: &[String]) -> Result<(), DecodeError> {
    let value = HeaderValue::from_str(&cookies.join(COOKIE_SEPARATOR))?;
    map.append(COOKIE, value);
    Ok(())
}

/// Flatten a multi-value header set into an envelope header map.
///
/// One value is emitted verbatim; several are joined with `,`.
pub fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut flat = BTreeMap::new();

    for name in headers.keys() {
        let values: Vec<String> = headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .collect();

        let value = match values.len() {
            0 => continue,
            1 => values.into_iter().next().unwrap_or_default(),
            _ => values.join(","),
        };
        flat.insert(name.as_str().to_string(), value);
    }

    flat
}
