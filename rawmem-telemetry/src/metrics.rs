//! ## rawmem-telemetry::metrics
//! **Prometheus gauges for allocation statistics**
//!
//! Counters live in `rawmem_core::alloc::AllocStats`; this module mirrors a
//! snapshot of them into a registry and renders the text exposition format.

use prometheus::{Encoder, IntGauge, Registry, TextEncoder};
use tracing::debug;

use rawmem_core::alloc::AllocStatsSnapshot;

#[derive(Debug, Clone)]
pub struct AllocMetrics {
    pub registry: Registry,
    pub allocations: IntGauge,
    pub zeroed_allocations: IntGauge,
    pub frees: IntGauge,
    pub outstanding: IntGauge,
    pub bytes_requested: IntGauge,
    pub failed_allocations: IntGauge,
}

impl AllocMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let gauge = |name: &str, help: &str| -> Result<IntGauge, prometheus::Error> {
            let gauge = IntGauge::new(name, help)?;
            registry.register(Box::new(gauge.clone()))?;
            Ok(gauge)
        };

        Ok(Self {
            allocations: gauge("rawmem_allocations_total", "Successful uninitialised allocations")?,
            zeroed_allocations: gauge(
                "rawmem_zeroed_allocations_total",
                "Successful zeroed allocations",
            )?,
            frees: gauge("rawmem_frees_total", "Buffers returned to the allocator")?,
            outstanding: gauge("rawmem_outstanding_buffers", "Allocations not yet freed")?,
            bytes_requested: gauge("rawmem_bytes_requested_total", "Bytes requested by allocations")?,
            failed_allocations: gauge(
                "rawmem_failed_allocations_total",
                "Allocation requests that returned no memory",
            )?,
            registry,
        })
    }

    /// Overwrites every gauge with the values of `snapshot`.
    pub fn observe(&self, snapshot: &AllocStatsSnapshot) {
        self.allocations.set(saturate(snapshot.allocations));
        self.zeroed_allocations
            .set(saturate(snapshot.zeroed_allocations));
        self.frees.set(saturate(snapshot.frees));
        self.outstanding.set(saturate(snapshot.outstanding()));
        self.bytes_requested.set(saturate(snapshot.bytes_requested));
        self.failed_allocations
            .set(saturate(snapshot.failed_allocations));
        debug!(outstanding = snapshot.outstanding(), "allocation metrics updated");
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

fn saturate(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
