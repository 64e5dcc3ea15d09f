//! Command table and dispatcher

use core::fmt::Write;

use crate::console::{CommandProcessor, OutputWriter};
use crate::globals::CONSOLE_LOG;
use crate::con_warn;

use super::commands::DEFAULT_COMMANDS;
use super::parser::{parse_line, ParsedCommand};
use super::CliError;

/// Default number of table slots.
pub const MAX_COMMANDS: usize = 16;

/// Command handler.
///
/// Returns `Ok(true)` to be called again for the same line with a fresh
/// output buffer and `ctx.invocation` one higher.
pub type CommandHandler = fn(&CommandContext<'_, '_>, &mut dyn Write) -> Result<bool, CliError>;

/// Command descriptor
pub struct CommandDefinition {
    pub name: &'static str,
    /// One help line, shown by `help`.
    pub help: &'static str,
    /// Exact parameter count, or `None` for any.
    pub expected_params: Option<u8>,
    pub handler: CommandHandler,
}

/// What a handler gets to see.
pub struct CommandContext<'c, 'a> {
    pub cmd: &'c ParsedCommand<'a>,
    /// 0 on the first call for a line.
    pub invocation: usize,
    commands: &'c [Option<&'static CommandDefinition>],
}

impl CommandContext<'_, '_> {
    /// All registered commands, in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &'static CommandDefinition> + '_ {
        self.commands.iter().filter_map(|c| *c)
    }
}

/// Registered commands plus per-line call state.
pub struct CommandTable<const N: usize = MAX_COMMANDS> {
    commands: [Option<&'static CommandDefinition>; N],
    len: usize,
    invocation: usize,
}

impl<const N: usize> CommandTable<N> {
    /// Create empty table
    pub const fn new() -> Self {
        Self {
            commands: [None; N],
            len: 0,
            invocation: 0,
        }
    }

    /// Add a command. Names are unique.
    pub fn register(&mut self, def: &'static CommandDefinition) -> Result<(), CliError> {
        if self.find(def.name).is_some() {
            return Err(CliError::DuplicateCommand);
        }

        let slot = self.commands.get_mut(self.len).ok_or(CliError::TableFull)?;
        *slot = Some(def);
        self.len += 1;
        Ok(())
    }

    /// Add every command in `defs`, stopping at the first failure.
    pub fn register_all(&mut self, defs: &[&'static CommandDefinition]) -> Result<(), CliError> {
        defs.iter().try_for_each(|def| self.register(*def))
    }

    pub fn find(&self, name: &str) -> Option<&'static CommandDefinition> {
        self.commands[..self.len]
            .iter()
            .filter_map(|c| *c)
            .find(|c| c.name == name)
    }

    /// Get all command names
    pub fn command_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands[..self.len].iter().filter_map(|c| c.map(|c| c.name))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Run one handler call for `cmd`.
    fn dispatch(&self, cmd: &ParsedCommand<'_>, out: &mut dyn Write) -> Result<bool, CliError> {
        let def = self.find(cmd.command).ok_or(CliError::UnknownCommand)?;

        if let Some(expected) = def.expected_params {
            if cmd.param_count != usize::from(expected) {
                return Err(CliError::WrongParamCount);
            }
        }

        let ctx = CommandContext {
            cmd,
            invocation: self.invocation,
            commands: &self.commands[..self.len],
        };
        (def.handler)(&ctx, out)
    }
}

impl<const N: usize> Default for CommandTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> CommandProcessor for CommandTable<N> {
    fn register_commands(&mut self) {
        for &def in DEFAULT_COMMANDS {
            if let Err(e) = self.register(def) {
                con_warn!(CONSOLE_LOG, "register '{}': {}", def.name, e);
            }
        }
    }

    fn process(&mut self, line: &str, output: &mut [u8]) -> bool {
        let cmd = parse_line(line);
        if cmd.command.is_empty() {
            // Empty line, do nothing
            self.invocation = 0;
            return false;
        }

        let mut out = OutputWriter::new(output);
        let more = match self.dispatch(&cmd, &mut out) {
            Ok(more) => more,
            Err(e) => {
                let _ = write!(out, "{}\r\n", e);
                false
            }
        };

        self.invocation = if more { self.invocation + 1 } else { 0 };
        more
    }
}
