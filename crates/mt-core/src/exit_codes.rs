//! Exit codes for the mt-core CLI.
//!
//! Exit codes communicate run outcome without requiring output parsing.
//!
//! Ranges:
//! - 0-1: operational outcomes
//! - 10-19: user/environment errors (recoverable by fixing inputs)
//! - 20-29: internal errors

use crate::experiment::RunError;

/// Exit codes for mt-core operations. Stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Run completed; no discrepancies found.
    Clean = 0,

    /// Run completed; at least one check produced findings.
    Findings = 1,

    /// Invalid arguments.
    ArgsError = 10,

    /// A configuration document violated its contract.
    ConfigError = 11,

    /// An input-contract violation between documents (misaligned histories,
    /// missing transitions, unfuzzified events).
    ContractError = 12,

    /// Internal error (bug - please report).
    InternalError = 20,

    /// I/O error.
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Map a run error onto the exit-code contract.
pub fn exit_code_for(error: &RunError) -> ExitCode {
    match error {
        RunError::Config(_) => ExitCode::ConfigError,
        RunError::Engine(_) | RunError::Sim(_) | RunError::Check(_) => ExitCode::ContractError,
        RunError::Io(_) => ExitCode::IoError,
        RunError::Report(_) | RunError::Json(_) => ExitCode::InternalError,
    }
}
