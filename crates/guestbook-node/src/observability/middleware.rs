//! Observability middleware for request tracking and metrics.
//!
//! Provides:
//! - Request ID generation and propagation
//! - HTTP metrics collection
//! - Request/response logging

use axum::{
    body::Body,
    extract::{MatchedPath, Request},
    http::{header, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use super::metrics::METRICS;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Type alias for the middleware future.
type MiddlewareFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Type alias for middleware function pointer.
type MiddlewareFn = fn(Request, Next) -> MiddlewareFuture;

/// Type alias for the middleware layer.
pub type MiddlewareLayer = axum::middleware::FromFnLayer<MiddlewareFn, (), (Request,)>;

/// Create a request ID layer.
///
/// Reuses the caller's `x-request-id` when present, otherwise generates a
/// UUID. The id is attached to the request span and echoed in the response.
pub fn request_id_layer() -> MiddlewareLayer {
    axum::middleware::from_fn(request_id_middleware_fn as MiddlewareFn)
}

fn request_id_middleware_fn(request: Request, next: Next) -> MiddlewareFuture {
    Box::pin(async move {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let span = tracing::info_span!(
            "request",
            request_id = %request_id,
            method = %request.method(),
            uri = %request.uri(),
        );

        let mut response = next.run(request).instrument(span).await;

        if let Ok(header_value) = HeaderValue::from_str(&request_id) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), header_value);
        }

        response
    })
}

/// Create a metrics layer.
pub fn metrics_layer() -> MiddlewareLayer {
    axum::middleware::from_fn(metrics_middleware_fn as MiddlewareFn)
}

fn metrics_middleware_fn(request: Request, next: Next) -> MiddlewareFuture {
    Box::pin(async move {
        let start = Instant::now();
        let method = request.method().to_string();
        let path = request
            .extensions()
            .get::<MatchedPath>()
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| "unmatched".to_string());

        METRICS.http_active_requests.inc();
        let response = next.run(request).await;
        METRICS.http_active_requests.dec();

        let duration = start.elapsed().as_secs_f64();
        let status = response.status().as_u16();

        METRICS.record_http_request(&method, &path, status, duration);

        tracing::debug!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = %format!("{:.2}", duration * 1000.0),
            "Request completed"
        );

        response
    })
}

/// Get metrics endpoint handler.
pub async fn metrics_handler() -> Response<Body> {
    let (status, content_type, body) = match METRICS.encode() {
        Ok(text) => (
            StatusCode::OK,
            "text/plain; version=0.0.4; charset=utf-8",
            text,
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "text/plain; charset=utf-8",
                "Failed to encode metrics".to_string(),
            )
        }
    };

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}
