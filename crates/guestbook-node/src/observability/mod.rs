//! # Observability Module
//!
//! Logging and metrics for the guestbook node:
//!
//! - **Structured Logging**: pretty or JSON logs filtered by `RUST_LOG`
//! - **Prometheus Metrics**: HTTP traffic and guestbook activity
//! - **Request Tracing**: `x-request-id` propagation into every span
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::Router;
//! use guestbook_node::observability::{init_logging, request_id_layer, LogFormat};
//!
//! init_logging("info", LogFormat::Json);
//!
//! let app: Router<()> = Router::new().layer(request_id_layer());
//! ```

mod logging;
mod metrics;
pub mod middleware;

pub use logging::{init_logging, LogFormat};
pub use metrics::{MetricsState, METRICS};
pub use middleware::{
    metrics_handler, metrics_layer, request_id_layer, MiddlewareLayer, REQUEST_ID_HEADER,
};
