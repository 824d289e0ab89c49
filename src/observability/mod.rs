//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the error mapper produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (text or JSON lines)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows from the inbound request to the optimizer call
//! - Metric calls are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
