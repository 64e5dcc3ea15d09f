//! Receive ring over DMA memory.
//!
//! The DMA engine writes into a [`DmaRegion`] in circular mode. [`RxRing`]
//! is a passive view over that memory: nothing ever pushes into it. The
//! worker moves the write cursor to wherever the hardware has got to, using
//! the remaining-count register, and pops from the read cursor.
//!
//! ```text
//!            read            write = capacity - remaining
//!             │                │
//!  [ . . . . a b c d e f g . . . . ]
//!             └── unread ──┘
//! ```
//!
//! The unread region may wrap past the end of the storage, so counts are
//! computed modulo capacity. A full lap of unread data (exactly `capacity`
//! bytes between two syncs) is indistinguishable from none.
//!
//! No internal locking. Only the worker touches the cursors.

use core::sync::atomic::{AtomicU8, Ordering};

/// Receive ring error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    /// Pop from an empty ring.
    Underflow,
}

impl RingError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Underflow => "receive ring underflow",
        }
    }
}

impl core::fmt::Display for RingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

/// Memory the DMA engine fills.
///
/// Bytes are atomics so the engine (or a test double) can write while the
/// worker holds shared references. `AtomicU8` has the layout of `u8`, so
/// [`as_mut_ptr`](Self::as_mut_ptr) can be programmed into a DMA channel.
pub struct DmaRegion<const N: usize> {
    cells: [AtomicU8; N],
}

impl<const N: usize> DmaRegion<N> {
    pub const fn new() -> Self {
        const { assert!(N > 0, "DMA region must not be empty") };

        Self {
            cells: [const { AtomicU8::new(0) }; N],
        }
    }

    #[inline]
    pub fn cells(&self) -> &[AtomicU8] {
        &self.cells
    }

    /// Base address for the DMA channel.
    #[inline]
    pub fn as_mut_ptr(&self) -> *mut u8 {
        self.cells.as_ptr() as *mut u8
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Write one byte, as the DMA engine does.
    #[inline]
    pub fn store(&self, index: usize, byte: u8) {
        self.cells[index % N].store(byte, Ordering::Relaxed);
    }
}

impl<const N: usize> Default for DmaRegion<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cursor state over a DMA region.
pub struct RxRing<'a> {
    storage: &'a [AtomicU8],
    write: usize,
    read: usize,
    count: usize,
}

impl<'a> RxRing<'a> {
    /// Empty ring over `storage`; both cursors at 0.
    pub fn new(storage: &'a [AtomicU8]) -> Self {
        Self {
            storage,
            write: 0,
            read: 0,
            count: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Number of unread bytes.
    #[inline]
    pub fn char_count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn write_cursor(&self) -> usize {
        self.write
    }

    #[inline]
    pub fn read_cursor(&self) -> usize {
        self.read
    }

    /// Move the write cursor to `pos` (mod capacity) and recount.
    pub fn set_write_cursor(&mut self, pos: usize) {
        let cap = self.capacity();
        if cap == 0 {
            return;
        }
        self.write = pos % cap;
        self.count = (self.write + cap - self.read) % cap;
    }

    /// Resync the write cursor from the DMA remaining-count register.
    ///
    /// `remaining` is clamped to the capacity; `remaining == capacity` and
    /// `remaining == 0` both mean the engine is at the start of the region.
    pub fn sync_from_remaining(&mut self, remaining: usize) {
        let cap = self.capacity();
        self.set_write_cursor(cap - remaining.min(cap));
    }

    /// Take the oldest unread byte.
    pub fn pop_char(&mut self) -> Result<u8, RingError> {
        if self.count == 0 {
            return Err(RingError::Underflow);
        }

        let byte = self.storage[self.read].load(Ordering::Relaxed);
        self.read = (self.read + 1) % self.capacity();
        self.count -= 1;
        Ok(byte)
    }

    /// Discard everything up to the write cursor.
    ///
    /// The cursors stay where the hardware is, so bytes the engine writes
    /// from here on show up at the next sync.
    pub fn flush(&mut self) {
        self.read = self.write;
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(region: &DmaRegion<8>, start: usize, bytes: &[u8]) {
        for (i, b) in bytes.iter().enumerate() {
            region.store(start + i, *b);
        }
    }

    #[test]
    fn test_new_ring_is_empty() {
        let region = DmaRegion::<8>::new();
        let mut ring = RxRing::new(region.cells());

        assert_eq!(ring.capacity(), 8);
        assert_eq!(ring.char_count(), 0);
        assert_eq!(ring.pop_char(), Err(RingError::Underflow));
    }

    #[test]
    fn test_sync_sets_write_cursor() {
        let region = DmaRegion::<8>::new();
        let mut ring = RxRing::new(region.cells());

        ring.sync_from_remaining(5);
        assert_eq!(ring.write_cursor(), 3);
        assert_eq!(ring.char_count(), 3);
    }

    #[test]
    fn test_wrapped_unread_region() {
        let region = DmaRegion::<8>::new();
        let mut ring = RxRing::new(region.cells());

        // First burst: 6 bytes.
        fill(&region, 0, b"abcdef");
        ring.sync_from_remaining(2);
        for _ in 0..6 {
            ring.pop_char().unwrap();
        }

        // Second burst wraps: 4 bytes at 6, 7, 0, 1.
        fill(&region, 6, b"ghij");
        ring.sync_from_remaining(6);
        assert!(ring.write_cursor() < ring.read_cursor());
        assert_eq!(ring.char_count(), 4);

        let mut out = [0u8; 4];
        for b in out.iter_mut() {
            *b = ring.pop_char().unwrap();
        }
        assert_eq!(&out, b"ghij");
        assert!(ring.is_empty());
    }

    #[test]
    fn test_flush_keeps_hardware_position() {
        let region = DmaRegion::<8>::new();
        let mut ring = RxRing::new(region.cells());

        fill(&region, 0, b"ab\rxy");
        ring.sync_from_remaining(3);
        ring.flush();

        assert_eq!(ring.char_count(), 0);
        assert_eq!(ring.read_cursor(), 5);

        // Same hardware position: nothing new.
        ring.sync_from_remaining(3);
        assert_eq!(ring.char_count(), 0);

        fill(&region, 5, b"z");
        ring.sync_from_remaining(2);
        assert_eq!(ring.pop_char(), Ok(b'z'));
    }

    #[test]
    fn test_remaining_full_and_zero_alias_start() {
        let region = DmaRegion::<8>::new();
        let mut ring = RxRing::new(region.cells());

        ring.sync_from_remaining(8);
        assert_eq!(ring.write_cursor(), 0);
        ring.sync_from_remaining(0);
        assert_eq!(ring.write_cursor(), 0);
        ring.sync_from_remaining(100);
        assert_eq!(ring.write_cursor(), 0);
    }
}
