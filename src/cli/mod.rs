//! Reference command processor
//!
//! A registered command table in the FreeRTOS+CLI manner: handlers may
//! stream long output one chunk per call, and `help` lists one command
//! per call.

pub mod commands;
pub mod error;
pub mod parser;
pub mod table;

pub use commands::DEFAULT_COMMANDS;
pub use error::CliError;
pub use parser::{parse_line, ParsedCommand};
pub use table::{CommandContext, CommandDefinition, CommandHandler, CommandTable};
