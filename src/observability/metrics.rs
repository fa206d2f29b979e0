//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define echo service metrics (request counts, latency)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `echo_requests_total` (counter): total requests by method, status
//! - `echo_request_duration_seconds` (histogram): latency distribution by method
//!
//! # Design Decisions
//! - Exporter runs its own listener, separate from the echo port
//! - Low-overhead metric updates (atomic operations in the recorder)

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, start_time: Instant) {
    let elapsed = start_time.elapsed().as_secs_f64();
    counter!(
        "echo_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "echo_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(elapsed);
}
