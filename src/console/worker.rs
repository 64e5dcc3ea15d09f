//! The console worker.
//!
//! One task drives everything: it sleeps until the line goes idle, pulls
//! the received bytes out of the DMA ring, assembles a line, runs it
//! through the command processor and streams the response back by DMA.
//!
//! ```text
//!  AwaitIdle ──idle wake──▶ sync write cursor ──▶ drain ring
//!      ▲                                           │  │  │
//!      │                          printable ◀──────┘  │  └──▶ BS/DEL
//!      │                                              ▼
//!      └──── ring empty ◀──── prompt ◀──── execute (process/send/wait)*
//! ```
//!
//! # Permit windows
//!
//! The UART permit is held from start-up on and released only while
//! waiting for the idle wake. At most one DMA transmission is in flight:
//! every asynchronous send is followed by a wait for transmit-complete
//! before the output buffer is touched again.

use core::sync::atomic::AtomicU8;

use crate::config::{ConsoleConfig, INPUT_BUFFER_SIZE, OUTPUT_BUFFER_SIZE};
use crate::fault::{ConsoleHealth, FaultCode, WaitState};
use crate::hal::ConsolePort;
use crate::logging::{timestamp_us, LogStream};
use crate::sync::{Permit, WakeSignal};
use crate::{con_debug, con_error, con_info, con_warn};

use super::line_buffer::{is_printable, LineBuffer, OutputBuffer};
use super::processor::CommandProcessor;
use super::ring::RxRing;
use super::send;

const CR: u8 = b'\r';
const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;

/// Shared collaborators of a worker.
///
/// Everything here outlives the worker and may be touched from other
/// contexts: interrupts notify `wake`, observers read `health` and drain
/// `log`.
///
/// The `stats` and `log` commands of [`CommandTable`](crate::cli::CommandTable)
/// read [`CONSOLE_HEALTH`](crate::CONSOLE_HEALTH) and
/// [`CONSOLE_LOG`](crate::CONSOLE_LOG). Point `health` and `log` at those
/// globals when the worker runs that table, or the commands report nothing.
pub struct ConsoleShared<'a, W: ?Sized, M: ?Sized> {
    pub wake: &'a W,
    pub permit: &'a M,
    pub health: &'a ConsoleHealth,
    pub log: &'a LogStream,
}

impl<W: ?Sized, M: ?Sized> Clone for ConsoleShared<'_, W, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W: ?Sized, M: ?Sized> Copy for ConsoleShared<'_, W, M> {}

/// Console worker state.
///
/// Exactly one instance per UART. Build it once at start-up and call
/// [`run`](Self::run) from the console task.
pub struct ConsoleWorker<
    'a,
    P,
    C,
    W: ?Sized,
    M: ?Sized,
    const LINE: usize = INPUT_BUFFER_SIZE,
    const OUT: usize = OUTPUT_BUFFER_SIZE,
> {
    port: P,
    processor: C,
    shared: ConsoleShared<'a, W, M>,
    rx_storage: &'a [AtomicU8],
    rx: RxRing<'a>,
    line: LineBuffer<LINE>,
    output: OutputBuffer<OUT>,
    config: ConsoleConfig,
    /// Overflow already reported for the current line.
    overflow_logged: bool,
    /// An idle wake arrived while waiting for transmit-complete.
    idle_pending: bool,
}

impl<'a, P, C, W, M, const LINE: usize, const OUT: usize> ConsoleWorker<'a, P, C, W, M, LINE, OUT>
where
    P: ConsolePort,
    C: CommandProcessor,
    W: WakeSignal + ?Sized,
    M: Permit + ?Sized,
{
    pub fn new(
        port: P,
        processor: C,
        rx_storage: &'a [AtomicU8],
        shared: ConsoleShared<'a, W, M>,
        config: ConsoleConfig,
    ) -> Self {
        Self {
            port,
            processor,
            shared,
            rx_storage,
            rx: RxRing::new(rx_storage),
            line: LineBuffer::new(),
            output: OutputBuffer::new(),
            config,
            overflow_logged: false,
            idle_pending: false,
        }
    }

    /// Start up and serve forever.
    pub fn run(&mut self) -> ! {
        self.start();
        loop {
            self.service_idle();
        }
    }

    /// Register commands, start receiving, take the permit and send the
    /// banner.
    pub fn start(&mut self) {
        self.processor.register_commands();

        self.rx = RxRing::new(self.rx_storage);
        self.port.start_continuous_receive(self.rx_storage);

        self.shared.permit.acquire();
        self.shared.health.enter(WaitState::Processing, timestamp_us());

        let banner = self.config.banner.as_bytes();
        self.port.send_async(banner);
        self.await_tx_complete();

        con_info!(self.shared.log, "console up, rx ring {} bytes", self.rx.capacity());
    }

    /// One idle cycle: give up the UART, sleep until the line goes idle,
    /// take the UART back and process whatever arrived.
    pub fn service_idle(&mut self) {
        self.shared.health.enter(WaitState::AwaitIdle, timestamp_us());
        self.shared.permit.release();

        if !core::mem::take(&mut self.idle_pending) {
            self.shared.wake.wait();
        }

        self.shared.permit.acquire();
        self.shared.health.enter(WaitState::Processing, timestamp_us());
        self.shared.health.idle_wake();

        self.rx.sync_from_remaining(self.port.remaining_count());
        self.drain();
    }

    /// Classify every unread byte.
    fn drain(&mut self) {
        while self.rx.char_count() > 0 {
            let byte = match self.rx.pop_char() {
                Ok(byte) => byte,
                Err(e) => {
                    self.shared.health.set_fault(FaultCode::RingUnderflow);
                    con_error!(self.shared.log, "{}", e);
                    return;
                }
            };

            match byte {
                CR => {
                    self.overflow_logged = false;
                    self.rx.flush();
                    self.execute_line();
                    self.line.clear();
                }
                BACKSPACE | DELETE => self.line.backspace(),
                c if is_printable(c) => self.accumulate(c),
                _ => self.shared.health.char_ignored(),
            }
        }
    }

    /// Store a printable character, or drop it if the line is full.
    fn accumulate(&mut self, c: u8) {
        if !self.line.push(c) {
            self.shared.health.char_dropped();
            if !self.overflow_logged {
                self.overflow_logged = true;
                con_warn!(self.shared.log, "line full at {} chars, dropping", LINE);
            }
        }
    }

    /// Run the current line through the processor until it has nothing
    /// more to say, then send the prompt.
    fn execute_line(&mut self) {
        con_debug!(self.shared.log, "exec '{}'", self.line.as_str());

        loop {
            self.output.clear();
            let more = self
                .processor
                .process(self.line.as_str(), self.output.as_mut_slice());

            if !self.output.is_empty() {
                self.port.send_async(self.output.content());
                self.shared.health.chunk_sent();
                self.await_tx_complete();
            }

            if !more {
                break;
            }
        }

        self.shared.health.line_executed();
        send::send_bounded(&mut self.port, self.config.prompt.as_bytes(), OUT);
    }

    /// Block until the in-flight transfer is done.
    ///
    /// A wake that arrives while the port still reports busy came from the
    /// idle line; it is remembered for the next idle cycle.
    fn await_tx_complete(&mut self) {
        self.shared.health.enter(WaitState::AwaitTxComplete, timestamp_us());
        loop {
            self.shared.wake.wait();
            if !self.port.tx_busy() {
                break;
            }
            self.idle_pending = true;
        }
        self.shared.health.enter(WaitState::Processing, timestamp_us());
    }

    /// Current line contents.
    pub fn line(&self) -> &str {
        self.line.as_str()
    }

    pub fn processor(&self) -> &C {
        &self.processor
    }

    pub fn rx(&self) -> &RxRing<'a> {
        &self.rx
    }
}
