//! Console health and fault state.
//!
//! The worker has two unbounded waits: the idle-line wake and the
//! transmit-complete wake. If the hardware never delivers either, the
//! console stalls. That is an accepted limitation and the worker never
//! times out; instead it publishes which wait it is in and since when,
//! so a supervisor or debugger can tell a stall from an idle line.
//!
//! Timestamps are kept as the low 32 bits of the microsecond clock
//! (32-bit atomics only on Xtensa), so wait durations wrap after ~71 min.

use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

/// Where the worker currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum WaitState {
    /// Worker not started yet.
    Stopped = 0,
    /// Permit released, blocked on the idle-line wake.
    AwaitIdle = 1,
    /// Permit held, draining the receive ring or running a command.
    Processing = 2,
    /// Blocked on transmit-complete after an asynchronous send.
    AwaitTxComplete = 3,
}

impl WaitState {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => WaitState::AwaitIdle,
            2 => WaitState::Processing,
            3 => WaitState::AwaitTxComplete,
            _ => WaitState::Stopped,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WaitState::Stopped => "stopped",
            WaitState::AwaitIdle => "await-idle",
            WaitState::Processing => "processing",
            WaitState::AwaitTxComplete => "await-tx",
        }
    }
}

/// Fault codes recorded by the worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FaultCode {
    /// No fault (normal operation).
    None = 0,

    /// Pop from an empty receive ring. The drain loop checks the count
    /// first, so this is a broken invariant, not a line condition.
    RingUnderflow = 1,
}

impl FaultCode {
    /// Convert from raw u8 value.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => FaultCode::RingUnderflow,
            _ => FaultCode::None,
        }
    }
}

/// Counters and wait state shared between the worker and observers.
///
/// Only the worker writes. Anyone may read.
///
/// ```ignore
/// static HEALTH: ConsoleHealth = ConsoleHealth::new();
///
/// // In a supervisor:
/// let snap = HEALTH.snapshot();
/// if snap.state == WaitState::AwaitTxComplete
///     && snap.waited_us(now_us) > 1_000_000
/// {
///     // transmit never completed; report it
/// }
/// ```
pub struct ConsoleHealth {
    state: AtomicU8,
    wait_started_us: AtomicU32,
    fault: AtomicU8,
    fault_count: AtomicU32,
    lines_executed: AtomicU32,
    chunks_sent: AtomicU32,
    chars_dropped: AtomicU32,
    chars_ignored: AtomicU32,
    idle_wakes: AtomicU32,
}

impl ConsoleHealth {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(WaitState::Stopped as u8),
            wait_started_us: AtomicU32::new(0),
            fault: AtomicU8::new(FaultCode::None as u8),
            fault_count: AtomicU32::new(0),
            lines_executed: AtomicU32::new(0),
            chunks_sent: AtomicU32::new(0),
            chars_dropped: AtomicU32::new(0),
            chars_ignored: AtomicU32::new(0),
            idle_wakes: AtomicU32::new(0),
        }
    }

    /// Record a state transition and when it happened.
    #[inline]
    pub fn enter(&self, state: WaitState, now_us: i64) {
        self.wait_started_us.store(now_us as u32, Ordering::Relaxed);
        self.state.store(state as u8, Ordering::Release);
    }

    #[inline]
    pub fn state(&self) -> WaitState {
        WaitState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Record a fault. The counter is never cleared.
    #[inline]
    pub fn set_fault(&self, code: FaultCode) {
        self.fault.store(code as u8, Ordering::Release);
        self.fault_count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn fault(&self) -> FaultCode {
        FaultCode::from_u8(self.fault.load(Ordering::Acquire))
    }

    /// Clear the last fault code, keeping the count.
    #[inline]
    pub fn clear_fault(&self) {
        self.fault.store(FaultCode::None as u8, Ordering::Release);
    }

    #[inline]
    pub(crate) fn line_executed(&self) {
        self.lines_executed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn chunk_sent(&self) {
        self.chunks_sent.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn char_dropped(&self) {
        self.chars_dropped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn char_ignored(&self) {
        self.chars_ignored.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn idle_wake(&self) {
        self.idle_wakes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> HealthSnapshot {
        HealthSnapshot {
            state: self.state(),
            wait_started_us: self.wait_started_us.load(Ordering::Relaxed),
            fault: self.fault(),
            fault_count: self.fault_count.load(Ordering::Relaxed),
            lines_executed: self.lines_executed.load(Ordering::Relaxed),
            chunks_sent: self.chunks_sent.load(Ordering::Relaxed),
            chars_dropped: self.chars_dropped.load(Ordering::Relaxed),
            chars_ignored: self.chars_ignored.load(Ordering::Relaxed),
            idle_wakes: self.idle_wakes.load(Ordering::Relaxed),
        }
    }
}

impl Default for ConsoleHealth {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of [`ConsoleHealth`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealthSnapshot {
    pub state: WaitState,
    pub wait_started_us: u32,
    pub fault: FaultCode,
    pub fault_count: u32,
    pub lines_executed: u32,
    pub chunks_sent: u32,
    pub chars_dropped: u32,
    pub chars_ignored: u32,
    pub idle_wakes: u32,
}

impl HealthSnapshot {
    /// Time spent in the current state.
    pub fn waited_us(&self, now_us: i64) -> u32 {
        (now_us as u32).wrapping_sub(self.wait_started_us)
    }
}
