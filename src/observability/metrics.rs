//! Metrics collection and exposition.
//!
//! # Metrics
//! - `secure_echo_requests_total` (counter): handled requests by status
//! - `secure_echo_request_duration_seconds` (histogram): handler latency
//! - `secure_echo_rejections_total` (counter): error responses by reason
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder the calls are no-ops, so tests need no setup
//! - Prometheus exposition is opt-in via config

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder with its own HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one handled request.
pub fn record_request(status: u16, start: Instant) {
    metrics::counter!("secure_echo_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("secure_echo_request_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

/// Record a request that ended in an error envelope.
pub fn record_rejection(reason: &'static str) {
    metrics::counter!("secure_echo_rejections_total", "reason" => reason).increment(1);
}
