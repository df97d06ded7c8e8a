//! Error reporting for the CLI.
//!
//! Commands return anyhow errors wrapping py7z-core's typed errors
//! (thiserror). This module prints them once to standard error with
//! actionable guidance and picks the process exit code.

use console::Term;
use console::style;
use py7z_core::NotFoundReason;
use py7z_core::Py7zError;
use py7z_core::config::EXECUTABLE_ENV_VAR;
use py7z_core::config::LOG_ENV_VAR;
use tracing::debug;

/// Exit code for failures that are not a `Py7zError`.
const GENERIC_FAILURE: u8 = 1;

fn core_error(err: &anyhow::Error) -> Option<&Py7zError> {
    err.chain().find_map(|cause| cause.downcast_ref::<Py7zError>())
}

/// Returns actionable guidance for a core error, if there is any.
fn hint(err: &Py7zError) -> Option<String> {
    match err {
        Py7zError::ExecutableNotFound {
            reason: NotFoundReason::InvalidOverride { path },
        } => Some(format!(
            "{EXECUTABLE_ENV_VAR} is set to '{}'. Point it at the 7-Zip executable or unset it.",
            path.display()
        )),
        Py7zError::ExecutableNotFound {
            reason: NotFoundReason::NotOnSearchPath { .. },
        } => Some(format!(
            "Install 7-Zip (7z, 7zz or 7za) or set {EXECUTABLE_ENV_VAR} to its full path."
        )),
        Py7zError::InvocationFailed { .. } => Some(
            "The executable was found but could not be started. Check its permissions.".to_string(),
        ),
        Py7zError::ListingFailed { .. } => Some(
            "Check that the file is an archive. Archives with encrypted headers need --password."
                .to_string(),
        ),
        Py7zError::MalformedOutput { .. } => Some(format!(
            "This 7-Zip build prints a listing layout py7z does not understand. \
             Run with {LOG_ENV_VAR}=debug to see the command that was used."
        )),
        Py7zError::InvalidValue { .. } | Py7zError::InvalidUsage(_) | Py7zError::Io(_) => None,
    }
}

/// Returns the exit code for a failed command.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    core_error(err).map_or(GENERIC_FAILURE, Py7zError::exit_code)
}

/// Renders the error report printed to standard error.
pub fn render(err: &anyhow::Error, use_colors: bool) -> String {
    let label = if use_colors {
        style("Error:").red().bold().to_string()
    } else {
        "Error:".to_string()
    };
    match core_error(err).and_then(hint) {
        Some(hint) => format!("{label} {err:?}\nHINT: {hint}"),
        None => format!("{label} {err:?}"),
    }
}

/// Prints the error report once to standard error.
pub fn report(err: &anyhow::Error) {
    if let Some(core) = core_error(err) {
        debug!(pre_launch = core.is_pre_launch(), code = core.exit_code(), "command failed");
    }
    let term = Term::stderr();
    let _ = term.write_line(&render(err, console::colors_enabled_stderr()));
}
