//! Line accumulation and output buffers

use crate::config::{INPUT_BUFFER_SIZE, OUTPUT_BUFFER_SIZE};

/// Line input buffer
///
/// Holds printable ASCII only, so the contents are always valid UTF-8.
pub struct LineBuffer<const N: usize = INPUT_BUFFER_SIZE> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> LineBuffer<N> {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; N],
            len: 0,
        }
    }

    /// Append a printable character.
    ///
    /// Returns `false` if the character was dropped, either because the
    /// buffer is full or because it is not printable ASCII.
    pub fn push(&mut self, c: u8) -> bool {
        if !is_printable(c) || self.len >= N {
            return false;
        }
        self.buf[self.len] = c;
        self.len += 1;
        true
    }

    /// Remove last character and zero its slot. No-op when empty.
    pub fn backspace(&mut self) {
        if self.len > 0 {
            self.len -= 1;
            self.buf[self.len] = 0;
        }
    }

    /// Zero the whole buffer
    pub fn clear(&mut self) {
        self.buf = [0u8; N];
        self.len = 0;
    }

    /// Get buffer as string slice
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// 0x20..=0x7E
#[inline]
pub fn is_printable(c: u8) -> bool {
    (b' '..=b'~').contains(&c)
}

/// Exchange surface with the command processor.
///
/// The processor writes NUL-terminated text; [`content`](Self::content)
/// is everything before the first NUL, or the whole buffer if it is full.
pub struct OutputBuffer<const N: usize = OUTPUT_BUFFER_SIZE> {
    buf: [u8; N],
}

impl<const N: usize> OutputBuffer<N> {
    pub const fn new() -> Self {
        Self { buf: [0u8; N] }
    }

    /// Zero-fill.
    pub fn clear(&mut self) {
        self.buf = [0u8; N];
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    pub fn content(&self) -> &[u8] {
        let end = self.buf.iter().position(|&b| b == 0).unwrap_or(N);
        &self.buf[..end]
    }

    /// True if the first byte is NUL.
    pub fn is_empty(&self) -> bool {
        self.buf.first().map_or(true, |&b| b == 0)
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for OutputBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// `fmt::Write` cursor over a raw output slice.
///
/// Keeps the last byte free so the text stays NUL-terminated; anything
/// past that is cut off silently.
pub struct OutputWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> OutputWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// True once output has been cut off.
    pub fn is_full(&self) -> bool {
        self.pos + 1 >= self.buf.len()
    }
}

impl core::fmt::Write for OutputWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let limit = self.buf.len().saturating_sub(1);
        let bytes = s.as_bytes();
        let available = limit.saturating_sub(self.pos);
        let to_copy = bytes.len().min(available);
        self.buf[self.pos..self.pos + to_copy].copy_from_slice(&bytes[..to_copy]);
        self.pos += to_copy;
        if self.pos < self.buf.len() {
            self.buf[self.pos] = 0;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn test_backspace_zeroes_slot() {
        let mut line = LineBuffer::<4>::new();
        line.push(b'a');
        line.push(b'b');
        line.backspace();

        assert_eq!(line.as_str(), "a");
        assert_eq!(line.buf, [b'a', 0, 0, 0]);
    }

    #[test]
    fn test_output_content_stops_at_nul() {
        let mut out = OutputBuffer::<8>::new();
        out.as_mut_slice()[..3].copy_from_slice(b"ok\n");

        assert_eq!(out.content(), b"ok\n");
        assert!(!out.is_empty());

        out.clear();
        assert!(out.is_empty());
        assert_eq!(out.content(), b"");
    }

    #[test]
    fn test_output_content_unterminated() {
        let mut out = OutputBuffer::<4>::new();
        out.as_mut_slice().copy_from_slice(b"full");
        assert_eq!(out.content(), b"full");
    }

    #[test]
    fn test_writer_keeps_terminator() {
        let mut raw = [0xFFu8; 6];
        let mut w = OutputWriter::new(&mut raw);
        let _ = write!(w, "toolong");

        assert_eq!(w.len(), 5);
        assert!(w.is_full());
        assert_eq!(&raw, b"toolo\0");
    }
}
