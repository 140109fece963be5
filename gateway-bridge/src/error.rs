//! Invocation error type.
//!
//! Every variant ends the invocation: the caller gets the error and no
//! envelope. Surfacing it as a failed invocation is the host runtime's job.

use gateway_bridge_core::{DecodeError, ErrorKind};

/// Boxed error type used for handler and body failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error returned by [`Adapter`](crate::Adapter) for one invocation.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The event could not be turned into a request.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The handler service failed instead of producing a response.
    #[error("handler failed: {0}")]
    Handler(#[source] BoxError),

    /// The handler's response body failed while it was being read.
    #[error("unable to read response body: {0}")]
    ResponseBody(#[source] BoxError),
}

impl BridgeError {
    /// Get the decode error kind, if this error happened while decoding.
    pub fn decode_kind(&self) -> Option<ErrorKind> {
        match self {
            BridgeError::Decode(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// Returns whether the handler (or its body) caused this error.
    pub fn is_handler(&self) -> bool {
        matches!(self, BridgeError::Handler(_) | BridgeError::ResponseBody(_))
    }

    pub(crate) fn handler<E: Into<BoxError>>(err: E) -> Self {
        BridgeError::Handler(err.into())
    }

    pub(crate) fn response_body<E: Into<BoxError>>(err: E) -> Self {
        BridgeError::ResponseBody(err.into())
    }
}
