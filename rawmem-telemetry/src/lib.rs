//! # rawmem Telemetry
//!
//! Crate for logging setup and allocation metrics export.

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, log_alloc_stats};
pub use metrics::AllocMetrics;
