//! Global console instances.
//!
//! The worker writes both; the `stats` and `log` commands read them.

use crate::fault::ConsoleHealth;
use crate::logging::LogStream;

/// Console event log.
///
/// Single producer (the console worker), drained by the `log` command,
/// which runs inside the same worker.
pub static CONSOLE_LOG: LogStream = LogStream::new();

/// Console wait state and counters.
pub static CONSOLE_HEALTH: ConsoleHealth = ConsoleHealth::new();
