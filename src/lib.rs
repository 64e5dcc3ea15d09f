//! # DmaLineConsole
//!
//! Line-oriented command console over a DMA-driven UART.
//!
//! ## Architecture
//!
//! ```text
//! UART RX ──DMA──▶ DmaRegion ──▶ ConsoleWorker ──▶ CommandProcessor
//!                      idle IRQ ──wake──▲    │
//!                                       │    ▼
//! UART TX ◀──DMA────────────────────────┼── OutputBuffer
//!                   tx-complete IRQ ──wake
//! ```
//!
//! - Interrupts only deliver a binary wake; they never touch buffers
//! - All cursor and line state belongs to the worker task
//! - No heap, no blocking I/O beyond the two unbounded waits

#![cfg_attr(not(test), no_std)]

pub mod cli;
pub mod config;
pub mod console;
pub mod fault;
pub mod globals;
pub mod hal;
pub mod logging;
pub mod sync;

pub use config::ConsoleConfig;
pub use console::{CommandProcessor, ConsoleShared, ConsoleWorker, DmaRegion, RxRing};
pub use fault::{ConsoleHealth, FaultCode, WaitState};
pub use globals::{CONSOLE_HEALTH, CONSOLE_LOG};
pub use sync::{AtomicWake, Permit, SpinPermit, WakeSignal};
