//! Subcommand implementations.

pub mod archive;
pub mod completion;
pub mod hash;
pub mod list;

use std::process::ExitCode;

/// Converts 7-Zip's exit code into this process's exit code.
///
/// Codes outside `0..=255` can only come from non-Unix hosts and are
/// clamped to 255.
pub fn forward_exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX))
}
