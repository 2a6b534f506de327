//! ## rawmem-telemetry::logging
//! **`tracing` subscriber setup**
//!
//! `rawmem-core` only emits `tracing` events; hosts that have no subscriber
//! of their own call [`init_logging`] once at startup.

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use rawmem_core::alloc::AllocStatsSnapshot;

/// Installs a formatting subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter` (for example the configured log level).
///
/// Returns false if a global subscriber was already set.
pub fn init_logging(default_filter: &str) -> bool {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_thread_names(true)
        .try_init()
        .is_ok()
}

/// Emits one structured event describing an allocation snapshot.
pub fn log_alloc_stats(snapshot: &AllocStatsSnapshot) {
    info!(
        allocations = snapshot.allocations,
        zeroed_allocations = snapshot.zeroed_allocations,
        frees = snapshot.frees,
        outstanding = snapshot.outstanding(),
        bytes_requested = snapshot.bytes_requested,
        failed_allocations = snapshot.failed_allocations,
        "allocation statistics"
    );
}
