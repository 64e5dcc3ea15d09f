//! Command line parser
//!
//! Simple split on whitespace, first 4 parameters kept.

/// Parameters kept per line.
pub const MAX_ARGS: usize = 4;

/// Parsed command with up to [`MAX_ARGS`] parameters
#[derive(Debug, Clone)]
pub struct ParsedCommand<'a> {
    /// The command name (first token)
    pub command: &'a str,
    /// First parameters
    pub args: [Option<&'a str>; MAX_ARGS],
    /// Parameters on the line, including any beyond `args`
    pub param_count: usize,
}

impl<'a> ParsedCommand<'a> {
    /// Create empty command
    pub const fn empty() -> Self {
        Self {
            command: "",
            args: [None; MAX_ARGS],
            param_count: 0,
        }
    }

    /// Get parameter by index (0-based)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).copied().flatten()
    }

    /// Kept parameters, in order.
    pub fn args(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.args.iter().filter_map(|a| *a)
    }
}

/// Parse a command line into command and parameters
pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    let mut parts = line.split_whitespace();

    let command = parts.next().unwrap_or("");

    let mut args = [None; MAX_ARGS];
    let mut param_count = 0;
    for arg in parts {
        if let Some(slot) = args.get_mut(param_count) {
            *slot = Some(arg);
        }
        param_count += 1;
    }

    ParsedCommand {
        command,
        args,
        param_count,
    }
}
