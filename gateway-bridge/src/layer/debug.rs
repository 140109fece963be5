//! Debug decorator for invocation services.

use std::fmt;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use gateway_bridge_core::{InvocationEvent, OutgoingEnvelope};
use tower::{Layer, Service, ServiceExt};

/// Layer that logs the serialized event before the call and the serialized
/// envelope after it.
///
/// Both dumps go through `tracing` at `DEBUG` level under the
/// `gateway_bridge` target. Nothing is serialized unless that level is enabled
/// when the call starts. Results are
/// passed through unchanged, errors included.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugLayer {
    _priv: (),
}

impl DebugLayer {
    /// Create a new DebugLayer.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> Layer<S> for DebugLayer {
    type Service = DebugService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DebugService { inner }
    }
}

/// Service produced by [`DebugLayer`].
#[derive(Debug, Clone)]
pub struct DebugService<S> {
    inner: S,
}

impl<S> DebugService<S> {
    /// Wrap an invocation service.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Consume the decorator, returning the wrapped service.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S> Service<InvocationEvent> for DebugService<S>
where
    S: Service<InvocationEvent, Response = OutgoingEnvelope> + Clone + Send + 'static,
    S::Error: fmt::Display + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = OutgoingEnvelope;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<OutgoingEnvelope, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, event: InvocationEvent) -> Self::Future {
        let debug = tracing::enabled!(target: "gateway_bridge", tracing::Level::DEBUG);
        if debug {
            match serde_json::to_string(&event) {
                Ok(json) => tracing::debug!(target: "gateway_bridge", event = %json, "invocation event"),
                Err(err) => tracing::debug!(target: "gateway_bridge", error = %err, "unable to serialize event"),
            }
        }

        let inner = self.inner.clone();
        let inner = std::mem::replace(&mut self.inner, inner);

        Box::pin(async move {
            let result = inner.oneshot(event).await;
            if !debug {
                return result;
            }
            match &result {
                Ok(envelope) => match serde_json::to_string(envelope) {
                    Ok(json) => {
                        tracing::debug!(target: "gateway_bridge", envelope = %json, "invocation response")
                    }
                    Err(err) => {
                        tracing::debug!(target: "gateway_bridge", error = %err, "unable to serialize envelope")
                    }
                },
                Err(err) => tracing::debug!(target: "gateway_bridge", error = %err, "invocation failed"),
            }
            result
        })
    }
}
