//! Default command set

use core::fmt::Write;

use crate::config::VERSION;
use crate::globals::{CONSOLE_HEALTH, CONSOLE_LOG};
use crate::logging::{format_entry, MAX_MSG_LEN};

use super::table::{CommandContext, CommandDefinition};
use super::CliError;

pub static HELP: CommandDefinition = CommandDefinition {
    name: "help",
    help: "help: Lists all the registered commands",
    expected_params: Some(0),
    handler: cmd_help,
};

pub static ECHO: CommandDefinition = CommandDefinition {
    name: "echo",
    help: "echo <...>: Echoes each parameter on its own line",
    expected_params: None,
    handler: cmd_echo,
};

pub static STATS: CommandDefinition = CommandDefinition {
    name: "stats",
    help: "stats: Console counters and wait state",
    expected_params: Some(0),
    handler: cmd_stats,
};

pub static LOG: CommandDefinition = CommandDefinition {
    name: "log",
    help: "log: Prints and clears the console event log",
    expected_params: Some(0),
    handler: cmd_log,
};

pub static VERSION_CMD: CommandDefinition = CommandDefinition {
    name: "version",
    help: "version: Firmware version",
    expected_params: Some(0),
    handler: cmd_version,
};

/// Registered by `CommandTable::register_commands`.
pub static DEFAULT_COMMANDS: &[&CommandDefinition] = &[&HELP, &ECHO, &STATS, &LOG, &VERSION_CMD];

/// One command per call.
fn cmd_help(ctx: &CommandContext<'_, '_>, out: &mut dyn Write) -> Result<bool, CliError> {
    let Some(cmd) = ctx.commands().nth(ctx.invocation) else {
        return Ok(false);
    };
    let _ = write!(out, "{}\r\n", cmd.help);
    Ok(ctx.commands().nth(ctx.invocation + 1).is_some())
}

/// Header first, then one parameter per call.
fn cmd_echo(ctx: &CommandContext<'_, '_>, out: &mut dyn Write) -> Result<bool, CliError> {
    let kept = ctx.cmd.args().count();

    if ctx.invocation == 0 {
        if kept == 0 {
            let _ = write!(out, "no parameters\r\n");
            return Ok(false);
        }
        let _ = write!(out, "The parameters were:\r\n");
        return Ok(true);
    }

    let idx = ctx.invocation - 1;
    if let Some(arg) = ctx.cmd.arg(idx) {
        let _ = write!(out, "{}: {}\r\n", idx + 1, arg);
    }
    Ok(idx + 1 < kept)
}

fn cmd_stats(_ctx: &CommandContext<'_, '_>, out: &mut dyn Write) -> Result<bool, CliError> {
    let snap = CONSOLE_HEALTH.snapshot();

    let _ = write!(out, "lines: {}  chunks: {}\r\n", snap.lines_executed, snap.chunks_sent);
    let _ = write!(out, "dropped: {}  ignored: {}\r\n", snap.chars_dropped, snap.chars_ignored);
    let _ = write!(out, "wakes: {}  faults: {}\r\n", snap.idle_wakes, snap.fault_count);
    let _ = write!(out, "log: {} pending, {} lost\r\n", CONSOLE_LOG.pending(), CONSOLE_LOG.dropped());
    Ok(false)
}

/// One entry per call.
fn cmd_log(ctx: &CommandContext<'_, '_>, out: &mut dyn Write) -> Result<bool, CliError> {
    let Some(entry) = CONSOLE_LOG.drain() else {
        if ctx.invocation == 0 {
            let _ = write!(out, "log empty\r\n");
        }
        return Ok(false);
    };

    let mut line = [0u8; MAX_MSG_LEN + 32];
    let len = format_entry(&entry, &mut line);
    let text = core::str::from_utf8(&line[..len]).map_err(|_| CliError::InvalidValue)?;
    let _ = out.write_str(text);

    let more = CONSOLE_LOG.pending() > 0;
    if !more && CONSOLE_LOG.dropped() > 0 {
        // Short enough to share the chunk with the entry.
        let _ = write!(out, "({} lost)\r\n", CONSOLE_LOG.dropped());
        CONSOLE_LOG.reset_dropped();
    }
    Ok(more)
}

fn cmd_version(_ctx: &CommandContext<'_, '_>, out: &mut dyn Write) -> Result<bool, CliError> {
    let _ = write!(out, "{}\r\n", VERSION);
    Ok(false)
}
