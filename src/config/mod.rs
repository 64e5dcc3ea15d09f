//! Module: config
//!
//! Purpose: Console sizing and user-visible strings.
//!
//! Buffer capacities are compile-time constants (const generic defaults),
//! so every buffer is statically allocated. Strings live in [`ConsoleConfig`].

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Receive ring capacity (bytes the DMA engine cycles through).
pub const RX_RING_SIZE: usize = 128;

/// Line accumulation capacity.
pub const INPUT_BUFFER_SIZE: usize = 128;

/// Output buffer capacity, also the cap on bytes per blocking send.
pub const OUTPUT_BUFFER_SIZE: usize = 128;

/// Welcome banner, sent once when the worker starts.
pub const WELCOME_BANNER: &str = concat!(
    "Type help to view a list of registered commands. ",
    env!("VERSION_STRING"),
    "\r\n\r\n>"
);

/// Prompt sent after every executed line.
pub const PROMPT: &str = "\n->";

/// Console strings.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleConfig {
    pub banner: &'static str,
    pub prompt: &'static str,
}

impl ConsoleConfig {
    pub const fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            prompt: PROMPT,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new()
    }
}
