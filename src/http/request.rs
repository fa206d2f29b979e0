//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4)
//! - Preserve a request ID supplied by the client or a fronting proxy
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The ID travels in request extensions, not headers: the echo
//!   handler must reflect the literal inbound headers, and identical
//!   requests must echo identically

use std::fmt;
use std::task::{Context, Poll};

use axum::http::{Extensions, Request};
use tower::{Layer, Service};
use uuid::Uuid;

/// Canonical request ID header name, honored when a client or fronting
/// proxy supplies one.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Correlation ID for a single request, stored in request extensions.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the request ID from request extensions, for log correlation.
pub fn request_id(extensions: &Extensions) -> &str {
    extensions
        .get::<RequestId>()
        .map(|id| id.0.as_str())
        .unwrap_or("unknown")
}

/// Tower layer that attaches a [`RequestId`] to every inbound request:
/// the client's `x-request-id` header when present, a fresh UUID v4
/// otherwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service produced by [`RequestIdLayer`].
#[derive(Clone, Debug)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for RequestIdService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let id = req
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        req.extensions_mut().insert(RequestId(id));
        self.inner.call(req)
    }
}
