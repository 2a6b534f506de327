//! `init_logging` sets the process-wide subscriber, so it gets its own test
//! binary.

use rawmem_telemetry::init_logging;

#[test]
fn only_the_first_init_installs_a_subscriber() {
    assert!(init_logging("warn"));
    assert!(!init_logging("debug"));
    assert!(tracing::dispatcher::has_been_set());
}
