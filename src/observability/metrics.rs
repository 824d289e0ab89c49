//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by outcome
//!   (`ok`, `client_error`, `server_error`, `transport`, `timeout`, `body`,
//!   `request`, `unhandled`)
//! - `gateway_optimizer_duration_seconds` (histogram): optimizer round trip by outcome

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one optimizer round trip.
pub fn record_forward(outcome: &'static str, start_time: Instant) {
    metrics::counter!("gateway_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("gateway_optimizer_duration_seconds", "outcome" => outcome)
        .record(start_time.elapsed().as_secs_f64());
}

/// Record a request that ended in the catch-all handler.
pub fn record_unhandled() {
    metrics::counter!("gateway_requests_total", "outcome" => "unhandled").increment(1);
}
