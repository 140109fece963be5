//! Query string handling.
//!
//! v1 envelopes carry decoded query parameters as a flat object, which is
//! re-encoded here with keys in lexicographic order. v2 envelopes carry the
//! gateway's own encoded string, which is passed through untouched.

use std::collections::BTreeMap;

use crate::error::DecodeError;

/// Encode a flat parameter map as a form-encoded query string.
///
/// Keys are emitted in lexicographic order. Returns `None` for an empty map so
/// callers never append a bare `?`.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use gateway_bridge_core::encode_query;
///
/// let params = BTreeMap::from([
///     ("b".to_string(), "2".to_string()),
///     ("a".to_string(), "1".to_string()),
/// ]);
/// assert_eq!(encode_query(&params).unwrap().as_deref(), Some("a=1&b=2"));
/// ```
pub fn encode_query(params: &BTreeMap<String, String>) -> Result<Option<String>, DecodeError> {
    if params.is_empty() {
        return Ok(None);
    }

    let encoded = serde_qs::to_string(params).map_err(DecodeError::request)?;
    Ok(Some(encoded))
}

/// Pass a pre-encoded query string through, treating empty as absent.
pub fn raw_query(raw: &str) -> Option<&str> {
    if raw.is_empty() { None } else { Some(raw) }
}
