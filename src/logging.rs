//! Non-blocking event log for the console.
//!
//! ```text
//! Worker                 LogStream            `log` command / debugger
//! ──────                 ─────────            ────────────────────────
//!
//! con_info!() ─────────▶ [L0][L1][L2] ──────▶ drain() + format_entry()
//! never blocks            lock-free
//! ```
//!
//! The console owns the UART, so log output cannot go straight to the
//! line: entries are parked here and pulled out on request.
//!
//! # Rules
//!
//! - Pushing never blocks and never allocates.
//! - Entries are dropped (and counted) when the ring is full.
//! - One producer context and one drain context per stream.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 64;

/// Log buffer size (number of entries).
pub const LOG_BUFFER_SIZE: usize = 32;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct LogEntry {
    /// Timestamp in microseconds.
    pub timestamp_us: i64,
    /// Log level.
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    pub const EMPTY: Self = Self {
        timestamp_us: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message text, or a marker if the bytes are not UTF-8.
    pub fn message(&self) -> &str {
        core::str::from_utf8(&self.msg[..self.len as usize]).unwrap_or("<invalid utf8>")
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Lock-free log ring (single producer, single drain).
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    entries: UnsafeCell<[LogEntry; N]>,
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: the producer only writes slots in [read, read + N) that the
// drain side has released, and publishes them with a Release store on
// write_idx. The drain side only reads slots below write_idx.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    /// Create a new empty log stream.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");

        Self {
            entries: UnsafeCell::new([LogEntry::EMPTY; N]),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a log entry, never blocks.
    ///
    /// Returns `true` if message was queued, `false` if dropped (ring full).
    /// Messages longer than [`MAX_MSG_LEN`] are truncated.
    #[inline]
    pub fn push(&self, timestamp_us: i64, level: LogLevel, msg: &[u8]) -> bool {
        let write = self.write_idx.load(Ordering::Relaxed);
        let read = self.read_idx.load(Ordering::Acquire);

        if write.wrapping_sub(read) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let idx = (write as usize) & Self::MASK;

        // SAFETY: slot idx is outside the drain window until write_idx moves.
        unsafe {
            let entry = &mut (*self.entries.get())[idx];
            entry.timestamp_us = timestamp_us;
            entry.level = level;
            entry.len = msg.len().min(MAX_MSG_LEN) as u8;
            entry.msg[..entry.len as usize].copy_from_slice(&msg[..entry.len as usize]);
        }

        self.write_idx.store(write.wrapping_add(1), Ordering::Release);
        true
    }

    /// Take the oldest entry, `None` if empty.
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        let idx = (read as usize) & Self::MASK;

        // SAFETY: slot idx was published by the producer's Release store.
        let entry = unsafe { (*self.entries.get())[idx] };

        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Get count of dropped messages.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reset dropped counter (e.g., after reporting).
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    /// Get number of entries waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounded `fmt::Write` over a byte slice. Excess output is cut off.
pub(crate) struct BufWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> BufWriter<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) fn written(&self) -> usize {
        self.pos
    }
}

impl core::fmt::Write for BufWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let remaining = self.buf.len() - self.pos;
        let to_write = bytes.len().min(remaining);
        self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
        self.pos += to_write;
        Ok(())
    }
}

/// Format a message into a buffer.
///
/// Returns the number of bytes written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    let mut writer = BufWriter::new(buf);
    let _ = core::fmt::write(&mut writer, args);
    writer.written()
}

/// Render an entry as `[timestamp_us] LEVEL: message\n`.
///
/// Returns the number of bytes written.
pub fn format_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    format_to_buffer(
        buf,
        format_args!(
            "[{:10}] {}: {}\n",
            entry.timestamp_us,
            entry.level.as_str(),
            entry.message()
        ),
    )
}

/// Microsecond timestamp for log entries.
#[cfg(target_os = "espidf")]
#[inline]
pub fn timestamp_us() -> i64 {
    // SAFETY: esp_timer_get_time is callable from any context
    unsafe { esp_idf_svc::sys::esp_timer_get_time() }
}

/// Microsecond timestamp for log entries.
///
/// Without a hardware timer this is a monotonic event counter, which keeps
/// entries ordered.
#[cfg(not(target_os = "espidf"))]
#[inline]
pub fn timestamp_us() -> i64 {
    static TICKS: AtomicU32 = AtomicU32::new(0);
    i64::from(TICKS.fetch_add(1, Ordering::Relaxed))
}

/// Non-blocking log macro.
///
/// # Example
///
/// ```ignore
/// con_log!(LogLevel::Info, CONSOLE_LOG, "line {} bytes", len);
/// ```
#[macro_export]
macro_rules! con_log {
    ($level:expr, $stream:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $stream.push($crate::logging::timestamp_us(), $level, &buf[..len]);
    }};
}

/// Error log.
#[macro_export]
macro_rules! con_error {
    ($stream:expr, $($arg:tt)*) => {
        $crate::con_log!($crate::logging::LogLevel::Error, $stream, $($arg)*)
    };
}

/// Warning log.
#[macro_export]
macro_rules! con_warn {
    ($stream:expr, $($arg:tt)*) => {
        $crate::con_log!($crate::logging::LogLevel::Warn, $stream, $($arg)*)
    };
}

/// Info log.
#[macro_export]
macro_rules! con_info {
    ($stream:expr, $($arg:tt)*) => {
        $crate::con_log!($crate::logging::LogLevel::Info, $stream, $($arg)*)
    };
}

/// Debug log.
#[macro_export]
macro_rules! con_debug {
    ($stream:expr, $($arg:tt)*) => {
        $crate::con_log!($crate::logging::LogLevel::Debug, $stream, $($arg)*)
    };
}

/// Trace log (maximum verbosity).
#[macro_export]
macro_rules! con_trace {
    ($stream:expr, $($arg:tt)*) => {
        $crate::con_log!($crate::logging::LogLevel::Trace, $stream, $($arg)*)
    };
}
