//! Interrupt handlers.
//!
//! Both handlers only deliver the wake signal. Cursor arithmetic is left
//! to the worker so interrupt and worker never race on the ring.
//!
//! A board port calls these from its vectors:
//!
//! ```ignore
//! #[interrupt]
//! fn USART2() {
//!     if isr::on_uart_interrupt(&mut uart_idle(), &CONSOLE_WAKE) {
//!         port_yield_from_isr();
//!     }
//! }
//! ```

use crate::hal::IdleLine;
use crate::sync::WakeSignal;

/// UART interrupt: wake the worker if the line went idle.
///
/// The vector may be shared with other UART events, so the idle flag is
/// re-checked first. Returns `true` if the interrupted context should
/// yield to the worker.
#[inline]
pub fn on_uart_interrupt<L, W>(line: &mut L, wake: &W) -> bool
where
    L: IdleLine + ?Sized,
    W: WakeSignal + ?Sized,
{
    if !line.idle_flag_set() {
        return false;
    }
    line.clear_idle_flag();
    wake.notify_from_isr()
}

/// DMA transmit complete: wake the worker.
#[inline]
pub fn on_tx_complete<W: WakeSignal + ?Sized>(wake: &W) -> bool {
    wake.notify_from_isr()
}

/// DMA transmit half complete: nothing to do.
#[inline]
pub fn on_tx_half_complete() {}
