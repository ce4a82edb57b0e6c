//! Metrics collection and exposition.
//!
//! # Metrics
//! - `promoter_invocations_total` (counter): invocations by outcome
//!   (`rewritten`, `skipped`, `error`)
//! - `promoter_headers_promoted_total` (counter): headers written
//! - `promoter_invocation_duration_seconds` (histogram): transform latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::transform::Promotion;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a completed transform.
pub fn record_invocation(promotion: Promotion, start: Instant) {
    let outcome = match promotion {
        Promotion::Skipped => "skipped",
        Promotion::Rewritten { .. } => "rewritten",
    };
    metrics::counter!("promoter_invocations_total", "outcome" => outcome).increment(1);
    metrics::counter!("promoter_headers_promoted_total").increment(promotion.promoted() as u64);
    metrics::histogram!("promoter_invocation_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

/// Record an invocation rejected before the transform ran.
pub fn record_failure(error_type: &'static str) {
    metrics::counter!("promoter_invocations_total", "outcome" => "error", "error_type" => error_type)
        .increment(1);
}
