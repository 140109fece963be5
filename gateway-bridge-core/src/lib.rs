//! Core wire types for gateway-bridge.
//!
//! This crate provides the envelope types and the leaf translation functions
//! used by the adapter (`gateway-bridge`) when converting between gateway
//! invocation envelopes and in-memory HTTP messages.
//!
//! ## Modules
//!
//! - [`error`]: Decode error kinds
//! - [`event`]: Inbound invocation envelopes (v1 and v2 shapes)
//! - [`envelope`]: Outbound response envelope
//! - [`codec`]: Body encoding (plain / base64)
//! - [`headers`]: Header projection between flat maps and multi-value sets
//! - [`query`]: Query string encoding
//! - [`path`]: Stage prefix resolution

mod codec;
mod envelope;
mod error;
mod event;
mod headers;
mod path;
mod query;

pub use codec::*;
pub use envelope::*;
pub use error::*;
pub use event::*;
pub use headers::*;
pub use path::*;
pub use query::*;
