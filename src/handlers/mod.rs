//! HTTP endpoint handlers for the exporter.
//!
//! Only the metrics endpoint is served; its path is configurable
//! (`/metrics` by default). Other paths fall through to axum's 404.

pub mod metrics;

// Re-export handlers
pub use metrics::metrics_handler;
