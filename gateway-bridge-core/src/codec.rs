//! Body encoding between envelope strings and raw bytes.
//!
//! Inbound bodies are either plain text or base64 (flagged by
//! `isBase64Encoded`). Outbound bodies are always base64 when non-empty.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;

use crate::error::DecodeError;

/// Decode an envelope body into raw bytes.
///
/// Precedence:
/// 1. Empty body: empty bytes, whatever the flag says.
/// 2. Non-empty and flagged: standard base64 decode.
/// 3. Non-empty and not flagged: the string's bytes, untouched.
///
/// # Errors
/// Returns [`DecodeError::BodyDecode`] if a flagged body is not valid base64.
pub fn decode_body(body: String, is_base64_encoded: bool) -> Result<Bytes, DecodeError> {
    if body.is_empty() {
        return Ok(Bytes::new());
    }

    if is_base64_encoded {
        let data = STANDARD.decode(body.as_bytes())?;
        return Ok(Bytes::from(data));
    }

    Ok(Bytes::from(body))
}

/// Encode raw response bytes for the outgoing envelope.
///
/// Returns `(body, is_base64_encoded)`. An empty payload yields an empty
/// string with the flag unset.
pub fn encode_body(raw: &[u8]) -> (String, bool) {
    if raw.is_empty() {
        return (String::new(), false);
    }

    let body = STANDARD.encode(raw);
    let is_base64_encoded = !body.is_empty();
    (body, is_base64_encoded)
}
