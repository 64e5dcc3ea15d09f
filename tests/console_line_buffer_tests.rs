//! Line buffer tests

use dma_line_console::console::{LineBuffer, OutputBuffer};

#[test]
fn test_line_buffer_push() {
    let mut buf = LineBuffer::<128>::new();

    for &c in b"help" {
        assert!(buf.push(c));
    }

    assert_eq!(buf.as_str(), "help");
    assert_eq!(buf.len(), 4);
}

#[test]
fn test_line_buffer_backspace() {
    let mut buf = LineBuffer::<128>::new();

    for &c in b"help" {
        buf.push(c);
    }
    buf.backspace();
    buf.backspace();

    assert_eq!(buf.as_str(), "he");
}

#[test]
fn test_line_buffer_excess_backspace() {
    let mut buf = LineBuffer::<128>::new();

    buf.push(b'x');
    for _ in 0..5 {
        buf.backspace(); // should not underflow
    }

    assert!(buf.is_empty());
    assert!(buf.push(b'y'));
    assert_eq!(buf.as_str(), "y");
}

#[test]
fn test_line_buffer_overflow_drops() {
    let mut buf = LineBuffer::<4>::new();

    for &c in b"abcdef" {
        buf.push(c);
    }

    assert!(buf.is_full());
    assert_eq!(buf.as_str(), "abcd");
    assert!(!buf.push(b'g'));

    buf.backspace();
    assert!(buf.push(b'z'));
    assert_eq!(buf.as_str(), "abcz");
}

#[test]
fn test_line_buffer_rejects_control() {
    let mut buf = LineBuffer::<128>::new();

    assert!(!buf.push(b'\r'));
    assert!(!buf.push(0x7F));
    assert!(!buf.push(0x80));
    assert!(buf.is_empty());
}

#[test]
fn test_line_buffer_clear() {
    let mut buf = LineBuffer::<128>::new();

    for &c in b"help" {
        buf.push(c);
    }
    buf.clear();

    assert_eq!(buf.as_str(), "");
    assert!(buf.is_empty());
}

#[test]
fn test_default_sizes() {
    let line: LineBuffer = LineBuffer::default();
    let out: OutputBuffer = OutputBuffer::default();

    assert_eq!(line.capacity(), 128);
    assert_eq!(out.capacity(), 128);
}
