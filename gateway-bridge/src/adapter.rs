//! The adapter service: envelope in, envelope out.
//!
//! [`Adapter`] wraps any HTTP [`Service`] (an axum `Router`, a
//! `tower::service_fn`, a hyper service, ...) and exposes it as a
//! `Service<InvocationEvent>` returning [`OutgoingEnvelope`]. One call runs:
//!
//! ```text
//! InvocationEvent ──decode──▶ Request ──handler──▶ Response ──record/encode──▶ OutgoingEnvelope
//! ```
//!
//! The adapter keeps no state between calls besides its configuration.

use std::marker::PhantomData;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::future::BoxFuture;
use gateway_bridge_core::{InvocationEvent, OutgoingEnvelope};
use http::{Extensions, Request, Response};
use tower::{Layer, Service, ServiceExt};

use crate::context::AdapterConfig;
use crate::error::{BoxError, BridgeError};
use crate::request::decode;
use crate::response::{ResponseBuffer, encode_response};

/// Adapts an HTTP service to gateway invocation envelopes.
///
/// `ReqBody` is the request body type the inner service expects; it is built
/// from the decoded body bytes with `From<Bytes>`.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, body::Body, routing::get};
/// use gateway_bridge::{Adapter, AdapterConfig};
///
/// let router = Router::new().route("/hello", get(|| async { "hello" }));
/// let adapter: Adapter<Router, Body> =
///     Adapter::with_config(router, AdapterConfig::new().stage_prefix("dev"));
///
/// let envelope = adapter.oneshot(event).await?;
/// ```
pub struct Adapter<S, ReqBody = Bytes> {
    inner: S,
    config: AdapterConfig,
    _body: PhantomData<fn(ReqBody)>,
}

impl<S, ReqBody> Adapter<S, ReqBody> {
    /// Wrap a handler with the default configuration.
    pub fn new(inner: S) -> Self {
        Self::with_config(inner, AdapterConfig::default())
    }

    /// Wrap a handler with an explicit configuration.
    pub fn with_config(inner: S, config: AdapterConfig) -> Self {
        Self {
            inner,
            config,
            _body: PhantomData,
        }
    }

    /// Returns the adapter configuration.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Returns a reference to the wrapped handler.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Consume the adapter, returning the wrapped handler.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Clone, ReqBody> Clone for Adapter<S, ReqBody> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: self.config.clone(),
            _body: PhantomData,
        }
    }
}

impl<S: std::fmt::Debug, ReqBody> std::fmt::Debug for Adapter<S, ReqBody> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adapter")
            .field("inner", &self.inner)
            .field("config", &self.config)
            .finish()
    }
}

impl<S, ReqBody, ResBody> Adapter<S, ReqBody>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send + 'static,
    ReqBody: From<Bytes> + Send + 'static,
    ResBody: http_body::Body + Send + 'static,
    ResBody::Data: Send,
    ResBody::Error: Into<BoxError>,
{
    /// Run one invocation, forwarding caller-supplied extensions to the handler.
    ///
    /// `extensions` are merged into the decoded request untouched. Use this to
    /// hand the handler a cancellation token or deadline owned by the host
    /// runtime; the adapter itself never inspects them.
    pub fn invoke_with(
        &mut self,
        event: InvocationEvent,
        extensions: Extensions,
    ) -> BoxFuture<'static, Result<OutgoingEnvelope, BridgeError>> {
        let version = event.version();
        let request = match decode(event, &self.config) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!(
                    target: "gateway_bridge",
                    version = version.as_str(),
                    kind = %err.kind(),
                    error = %err,
                    "failed to decode event"
                );
                return Box::pin(async move { Err(BridgeError::Decode(err)) });
            }
        };

        let mut request = request.map(ReqBody::from);
        request.extensions_mut().extend(extensions);

        // Clone inner service for the async block
        let clone = self.inner.clone();
        let inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let response = inner.oneshot(request).await.map_err(BridgeError::handler)?;
            let buffer = ResponseBuffer::record(response)
                .await
                .map_err(BridgeError::response_body)?;
            Ok(encode_response(buffer))
        })
    }
}

impl<S, ReqBody, ResBody> Service<InvocationEvent> for Adapter<S, ReqBody>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send + 'static,
    ReqBody: From<Bytes> + Send + 'static,
    ResBody: http_body::Body + Send + 'static,
    ResBody::Data: Send,
    ResBody::Error: Into<BoxError>,
{
    type Response = OutgoingEnvelope;
    type Error = BridgeError;
    type Future = BoxFuture<'static, Result<OutgoingEnvelope, BridgeError>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(BridgeError::handler)
    }

    fn call(&mut self, event: InvocationEvent) -> Self::Future {
        self.invoke_with(event, Extensions::new())
    }
}

/// Layer that wraps an HTTP service in an [`Adapter`].
///
/// ```rust,ignore
/// let svc = ServiceBuilder::new()
///     .layer(DebugLayer::new())
///     .layer(AdapterLayer::<Body>::new(AdapterConfig::from_env()))
///     .service(router);
/// ```
pub struct AdapterLayer<ReqBody = Bytes> {
    config: AdapterConfig,
    _body: PhantomData<fn(ReqBody)>,
}

impl<ReqBody> AdapterLayer<ReqBody> {
    /// Create a layer with the given configuration.
    pub fn new(config: AdapterConfig) -> Self {
        Self {
            config,
            _body: PhantomData,
        }
    }
}

impl<ReqBody> Default for AdapterLayer<ReqBody> {
    fn default() -> Self {
        Self::new(AdapterConfig::default())
    }
}

impl<ReqBody> Clone for AdapterLayer<ReqBody> {
    fn clone(&self) -> Self {
        Self::new(self.config.clone())
    }
}

impl<ReqBody> std::fmt::Debug for AdapterLayer<ReqBody> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterLayer")
            .field("config", &self.config)
            .finish()
    }
}

impl<S, ReqBody> Layer<S> for AdapterLayer<ReqBody> {
    type Service = Adapter<S, ReqBody>;

    fn layer(&self, inner: S) -> Self::Service {
        Adapter::with_config(inner, self.config.clone())
    }
}
