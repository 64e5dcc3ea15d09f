//! Worker wired to the global health record and log, running the
//! reference command table.

mod common;

use common::{Hw, BANNER};
use dma_line_console::cli::CommandTable;
use dma_line_console::{
    ConsoleConfig, ConsoleShared, ConsoleWorker, SpinPermit, CONSOLE_HEALTH, CONSOLE_LOG,
};

// Single test: the globals are process-wide.
#[test]
fn test_stats_and_log_see_worker_activity() {
    let hw = Hw::<64>::new();
    let shared = ConsoleShared {
        wake: &hw,
        permit: &hw.permit,
        health: &CONSOLE_HEALTH,
        log: &CONSOLE_LOG,
    };
    let config = ConsoleConfig {
        banner: BANNER,
        prompt: "\n->",
    };
    let mut worker: ConsoleWorker<'_, common::FakePort<'_, 64>, CommandTable, Hw<64>, SpinPermit> =
        ConsoleWorker::new(hw.port(), CommandTable::new(), hw.region.cells(), shared, config);
    worker.start();

    hw.burst(b"version\r");
    worker.service_idle();
    hw.clear_wire();

    hw.burst(b"stats\r");
    worker.service_idle();
    let stats = hw.wire_string();
    assert!(stats.starts_with("lines: 1  chunks: 1\r\n"), "stats: {stats:?}");

    hw.clear_wire();
    hw.burst(b"log\r");
    worker.service_idle();
    let log = hw.wire_string();
    assert!(log.contains("console up"), "log: {log:?}");
}
