//! Hardware facility seams.
//!
//! The console never touches registers directly. A board port implements
//! these traits over its UART and DMA channels; host tests implement them
//! with scripted fakes.

use core::sync::atomic::AtomicU8;

#[cfg(target_os = "espidf")]
pub mod freertos;

/// Continuous circular DMA receive.
pub trait DmaRx {
    /// Start filling `cells` in circular mode and enable the idle-line
    /// interrupt. Called once, before the first idle wake.
    fn start_continuous_receive(&mut self, cells: &[AtomicU8]);

    /// Bytes left before the DMA engine wraps back to the start of the
    /// region (the hardware remaining-count register).
    fn remaining_count(&self) -> usize;
}

/// Asynchronous DMA transmit.
pub trait DmaTx {
    /// Start sending `data` and return immediately.
    ///
    /// Completion is reported by the transmit-complete interrupt. The caller
    /// must keep `data` untouched until then.
    fn send_async(&mut self, data: &[u8]);

    /// A transfer is still running.
    ///
    /// The worker shares one wake signal between idle-line and
    /// transmit-complete, so it checks this after every transmit wake.
    /// Ports without a busy flag may leave the default and trust the wake.
    fn tx_busy(&self) -> bool {
        false
    }
}

/// Raw transmit data register, for blocking sends.
pub trait TxRegister {
    fn write_data(&mut self, byte: u8);

    /// Hardware transmit-complete flag.
    fn transmit_complete(&self) -> bool;
}

/// Interrupt-side view of the idle-line condition.
pub trait IdleLine {
    fn idle_flag_set(&self) -> bool;
    fn clear_idle_flag(&mut self);
}

/// Everything the worker needs from the UART.
pub trait ConsolePort: DmaRx + DmaTx + TxRegister {}

impl<T: DmaRx + DmaTx + TxRegister> ConsolePort for T {}
