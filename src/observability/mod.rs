//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handler / harness produce:
//!     → logging.rs (structured log events, before/after request state)
//!     → metrics.rs (invocation counters, promoted headers, latency)
//!
//! Consumers:
//!     → Log aggregation (stdout, JSON lines in production)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the harness via `x-request-id`
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
