//! Decode error types.
//!
//! Every error in this module is fatal to the invocation that produced it:
//! no request is built and no envelope is returned.
//! - [`ErrorKind`]: The category of a decode failure
//! - [`DecodeError`]: The error returned while building a request from an event

use std::num::ParseIntError;

/// Category of a [`DecodeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The `content-length` header is not a non-negative base-10 integer.
    ContentLength,
    /// The body is flagged as base64 but does not decode.
    BodyDecode,
    /// The method, URL or headers cannot form a valid request.
    RequestConstruction,
}

impl ErrorKind {
    /// Get the string representation of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ContentLength => "content_length",
            ErrorKind::BodyDecode => "body_decode",
            ErrorKind::RequestConstruction => "request_construction",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an invocation event cannot be turned into a request.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Declared content length is not a valid non-negative integer.
    #[error("unable to parse content length, {value}: {source}")]
    ContentLength {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Body flagged as base64 failed to decode.
    #[error("unable to base64 decode request body: {0}")]
    BodyDecode(#[from] base64::DecodeError),

    /// Assembled request parts are invalid.
    #[error("unable to create request: {0}")]
    RequestConstruction(String),
}

impl DecodeError {
    /// Create a request construction error from any displayable cause.
    pub fn request<E: std::fmt::Display>(cause: E) -> Self {
        Self::RequestConstruction(cause.to_string())
    }

    /// Get the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::ContentLength { .. } => ErrorKind::ContentLength,
            DecodeError::BodyDecode(_) => ErrorKind::BodyDecode,
            DecodeError::RequestConstruction(_) => ErrorKind::RequestConstruction,
        }
    }
}

impl From<http::Error> for DecodeError {
    fn from(err: http::Error) -> Self {
        Self::request(err)
    }
}

impl From<http::header::InvalidHeaderName> for DecodeError {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::request(err)
    }
}

impl From<http::header::InvalidHeaderValue> for DecodeError {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request(err)
    }
}
