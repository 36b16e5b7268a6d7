use crate::future::ResponseFuture;
use crate::layer::Config;
use crate::negotiated::Negotiated;
use http::{Request, Response};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;

/// A Tower service that negotiates request content preferences.
///
/// Requires `ResBody: Default` for the `406 Not Acceptable` response.
#[derive(Debug, Clone)]
pub struct NegotiationService<S> {
    inner: S,
    config: Arc<Config>,
}

impl<S> NegotiationService<S> {
    pub(crate) fn new(inner: S, config: Arc<Config>) -> Self {
        Self { inner, config }
    }

    /// Returns a reference to the inner service.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Returns a mutable reference to the inner service.
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Consumes this service, returning the inner service.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for NegotiationService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    ResBody: Default,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = ResponseFuture<S::Future, ResBody>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let negotiated = Negotiated::from_headers(req.headers(), &self.config.offers);
        let dimensions = self.config.dimensions();

        if self.config.reject_not_acceptable && !negotiated.is_acceptable() {
            tracing::debug!(uri = %req.uri(), ?negotiated, "rejecting not acceptable request");
            return ResponseFuture::not_acceptable(dimensions);
        }

        req.extensions_mut().insert(negotiated);
        let inner = self.inner.call(req);

        ResponseFuture::new(inner, dimensions)
    }
}
