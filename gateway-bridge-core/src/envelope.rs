//! Outbound response envelope.
//!
//! The gateway expects the handler's reply as:
//!
//! ```text
//! {"statusCode": 200, "headers": {...}, "body": "<base64>", "isBase64Encoded": true}
//! ```
//!
//! Headers are single strings per name (multiple values comma-joined) and the
//! body is always base64 when present.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::codec::decode_body;
use crate::error::DecodeError;
use crate::event::is_false;

/// Response envelope returned to the gateway.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingEnvelope {
    #[serde(default)]
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_base64_encoded: bool,
}

impl OutgoingEnvelope {
    /// Get a header value by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        crate::headers::header_value(&self.headers, name)
    }

    /// Decode the body back to raw bytes.
    pub fn body_bytes(&self) -> Result<Bytes, DecodeError> {
        decode_body(self.body.clone(), self.is_base64_encoded)
    }
}
