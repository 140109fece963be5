//! Response capture and envelope encoding.
//!
//! The handler's response is drained into a [`ResponseBuffer`] frame by
//! frame, then [`encode_response`] turns the buffer into the
//! [`OutgoingEnvelope`] handed back to the gateway.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use gateway_bridge_core::{OutgoingEnvelope, encode_body, flatten_headers};
use http::{HeaderMap, Response, StatusCode};
use http_body::Body;
use http_body_util::BodyExt;

use crate::error::BoxError;

/// Captured handler response: status, headers and accumulated body bytes.
///
/// The status defaults to `200 OK` until something sets it.
///
/// # Example
///
/// ```rust
/// use std::io::Write;
/// use gateway_bridge::{ResponseBuffer, encode_response};
///
/// let mut buffer = ResponseBuffer::new();
/// buffer.headers_mut().insert("content-type", "text/plain".parse().unwrap());
/// write!(buffer, "hello").unwrap();
///
/// let envelope = encode_response(buffer);
/// assert_eq!(envelope.status_code, 200);
/// assert_eq!(envelope.body, "aGVsbG8=");
/// assert!(envelope.is_base64_encoded);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ResponseBuffer {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
}

impl ResponseBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain an HTTP response into a buffer.
    ///
    /// Data frames are appended in order; trailers are dropped.
    ///
    /// # Errors
    /// Returns the body's error if a frame fails.
    pub async fn record<B>(response: Response<B>) -> Result<Self, BoxError>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        let (parts, body) = response.into_parts();
        let mut buffer = Self {
            status: Some(parts.status),
            headers: parts.headers,
            body: BytesMut::new(),
        };

        let mut body = std::pin::pin!(body);
        while let Some(frame) = body.frame().await {
            let frame = frame.map_err(Into::<BoxError>::into)?;
            if let Ok(data) = frame.into_data() {
                buffer.write_data(data);
            }
        }

        Ok(buffer)
    }

    /// Set the status code.
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    /// Returns the status code, `200 OK` if never set.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    /// Returns the recorded headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the recorded headers for modification.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Append bytes to the body.
    pub fn write_data<D: Buf>(&mut self, data: D) {
        self.body.put(data);
    }

    /// Returns the accumulated body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Encode this buffer as an outgoing envelope.
    pub fn into_envelope(self) -> OutgoingEnvelope {
        encode_response(self)
    }
}

impl std::io::Write for ResponseBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl From<Response<Bytes>> for ResponseBuffer {
    fn from(response: Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: Some(parts.status),
            headers: parts.headers,
            body: BytesMut::from(&body[..]),
        }
    }
}

/// Encode a captured response as an outgoing envelope.
///
/// Headers with several values are joined with `,`. The body is base64 when
/// non-empty; an empty body is `""` with `isBase64Encoded` unset.
pub fn encode_response(buffer: ResponseBuffer) -> OutgoingEnvelope {
    let status_code = buffer.status().as_u16();
    let headers = flatten_headers(&buffer.headers);
    let (body, is_base64_encoded) = encode_body(&buffer.body);

    tracing::debug!(
        target: "gateway_bridge",
        status = status_code,
        headers = headers.len(),
        body_len = buffer.body.len(),
        "encoded response"
    );

    OutgoingEnvelope {
        status_code,
        headers,
        body,
        is_base64_encoded,
    }
}
