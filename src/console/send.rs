//! Blocking send primitives.
//!
//! Byte at a time through the data register, spinning on the
//! transmit-complete flag after each byte. Only for short fixed text
//! (prompt, numbers); command output goes through DMA.

use crate::config::OUTPUT_BUFFER_SIZE;
use crate::hal::TxRegister;
use crate::logging::BufWriter;

/// Send one byte and wait for it to leave the shift register.
pub fn send_byte<T: TxRegister + ?Sized>(tx: &mut T, byte: u8) {
    tx.write_data(byte);
    while !tx.transmit_complete() {
        core::hint::spin_loop();
    }
}

/// Send bytes up to the first NUL, at most [`OUTPUT_BUFFER_SIZE`] of them.
///
/// Returns the number of bytes sent.
pub fn send_str<T: TxRegister + ?Sized>(tx: &mut T, text: &[u8]) -> usize {
    send_bounded(tx, text, OUTPUT_BUFFER_SIZE)
}

/// Send bytes up to the first NUL, at most `cap` of them.
///
/// The worker passes its own output capacity as `cap`.
pub fn send_bounded<T: TxRegister + ?Sized>(tx: &mut T, text: &[u8], cap: usize) -> usize {
    let mut sent = 0;
    for &byte in text.iter().take(cap) {
        if byte == 0 {
            break;
        }
        send_byte(tx, byte);
        sent += 1;
    }
    sent
}

/// Send a signed integer in decimal.
pub fn send_int<T: TxRegister + ?Sized>(tx: &mut T, num: i32) -> usize {
    // "-2147483648"
    let mut digits = [0u8; 12];
    let mut w = BufWriter::new(&mut digits);
    let _ = core::fmt::write(&mut w, format_args!("{}", num));
    let len = w.written();
    send_str(tx, &digits[..len])
}

/// Send a float with two decimals.
pub fn send_float<T: TxRegister + ?Sized>(tx: &mut T, num: f32) -> usize {
    let mut digits = [0u8; 16];
    let mut w = BufWriter::new(&mut digits);
    let _ = core::fmt::write(&mut w, format_args!("{:.2}", num));
    let len = w.written();
    send_str(tx, &digits[..len])
}
