//! Wake signal and UART permit.
//!
//! Interrupt handlers talk to the worker through exactly one primitive, a
//! binary wake signal. The physical UART is guarded by a permit the worker
//! holds everywhere except while it waits for the line to go idle.
//!
//! The portable implementations here are atomics with spin waits. On
//! FreeRTOS use [`crate::hal::freertos`] so waits suspend the task.

use core::sync::atomic::{AtomicBool, Ordering};

/// One-shot wake from interrupt context to the worker.
///
/// Binary: any number of notifications before a `wait` collapse into one.
pub trait WakeSignal {
    /// Deliver the wake. Callable from interrupt context.
    ///
    /// Returns `true` if a higher-priority context became runnable and the
    /// interrupt should yield on exit.
    /// The yield itself is left to the interrupt vector.
    fn notify_from_isr(&self) -> bool;

    /// Block until notified. No timeout.
    fn wait(&self);
}

/// Mutual exclusion over the UART.
pub trait Permit {
    /// Block until the permit is held. No timeout.
    fn acquire(&self);
    fn release(&self);
}

/// Binary wake flag.
pub struct AtomicWake {
    pending: AtomicBool,
}

impl AtomicWake {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Consume a pending wake without blocking.
    #[inline]
    pub fn try_take(&self) -> bool {
        self.pending.swap(false, Ordering::Acquire)
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

impl WakeSignal for AtomicWake {
    #[inline]
    fn notify_from_isr(&self) -> bool {
        self.pending.store(true, Ordering::Release);
        // No scheduler to yield to.
        false
    }

    fn wait(&self) {
        while !self.try_take() {
            core::hint::spin_loop();
        }
    }
}

impl Default for AtomicWake {
    fn default() -> Self {
        Self::new()
    }
}

/// Spinning mutex flag.
pub struct SpinPermit {
    held: AtomicBool,
}

impl SpinPermit {
    pub const fn new() -> Self {
        Self {
            held: AtomicBool::new(false),
        }
    }

    /// Take the permit if it is free.
    #[inline]
    pub fn try_acquire(&self) -> bool {
        self.held
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    #[inline]
    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Relaxed)
    }
}

impl Permit for SpinPermit {
    fn acquire(&self) {
        while !self.try_acquire() {
            core::hint::spin_loop();
        }
    }

    #[inline]
    fn release(&self) {
        self.held.store(false, Ordering::Release);
    }
}

impl Default for SpinPermit {
    fn default() -> Self {
        Self::new()
    }
}
