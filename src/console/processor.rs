//! Command processor seam.

/// Turns a command line into response text, possibly over several calls.
pub trait CommandProcessor {
    /// Register the command table. Called once, before the first line.
    fn register_commands(&mut self) {}

    /// Process `line`, writing NUL-terminated text into `output`.
    ///
    /// `output` arrives zero-filled. Returning `true` asks to be called again
    /// for the same line with a freshly cleared buffer.
    fn process(&mut self, line: &str, output: &mut [u8]) -> bool;
}
