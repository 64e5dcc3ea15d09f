//! CLI error types

/// CLI error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliError {
    /// E01: Unknown command
    UnknownCommand,
    /// E02: Wrong number of parameters
    WrongParamCount,
    /// E03: Invalid parameter value
    InvalidValue,
    /// E04: Command table has no free slot
    TableFull,
    /// E05: Command name already registered
    DuplicateCommand,
}

impl CliError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::WrongParamCount => "E02",
            Self::InvalidValue => "E03",
            Self::TableFull => "E04",
            Self::DuplicateCommand => "E05",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown command, enter 'help' for a list",
            Self::WrongParamCount => "wrong number of parameters",
            Self::InvalidValue => "invalid value",
            Self::TableFull => "command table full",
            Self::DuplicateCommand => "command already registered",
        }
    }
}

impl core::fmt::Display for CliError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
