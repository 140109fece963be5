//! Tower layers for invocation services.
//!
//! - [`AdapterLayer`](crate::AdapterLayer): wraps an HTTP service so it accepts invocation events.
//! - [`DebugLayer`]: logs every event and envelope passing through an invocation service.
//!
//! ## Layer Stack Order
//!
//! `DebugLayer` sits outside the adapter so it sees the raw event and the
//! final envelope:
//!
//! ```rust,ignore
//! use gateway_bridge::{AdapterConfig, AdapterLayer, DebugLayer};
//! use tower::ServiceBuilder;
//!
//! let svc = ServiceBuilder::new()
//!     .layer(DebugLayer::new())                               // Outer: event/envelope dump
//!     .layer(AdapterLayer::<Body>::new(AdapterConfig::from_env())) // Inner: decode/encode
//!     .service(router);
//! ```
//!
//! ```text
//! ┌──────────────────────────────────┐
//! │           DebugLayer             │  ← logs event JSON, envelope JSON
//! │  ┌────────────────────────────┐  │
//! │  │         Adapter            │  │  ← event → request, response → envelope
//! │  │  ┌──────────────────────┐  │  │
//! │  │  │      Handler         │  │  │  ← your HTTP service
//! │  │  └──────────────────────┘  │  │
//! │  └────────────────────────────┘  │
//! └──────────────────────────────────┘
//! ```

mod debug;

pub use debug::{DebugLayer, DebugService};
