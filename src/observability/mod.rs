//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! faucet dispatcher / txmgr / http
//!     → logging.rs (tracing subscriber, pretty or JSON)
//!     → metrics.rs (fund action counters and latencies)
//!
//! Consumers:
//!     → stdout log aggregation
//!     → Prometheus scrape endpoint
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::{init_metrics, FundActionDone, Metricer, NoopMetrics, PrometheusMetrics};
