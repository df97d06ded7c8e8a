//! Diagnostic logging setup.

use py7z_core::config::LOG_ENV_VAR;
use tracing_subscriber::EnvFilter;

/// Filter used when `PY7Z_LOG` is unset or invalid.
const DEFAULT_DIRECTIVE: &str = "warn";

/// Installs a stderr subscriber filtered by `PY7Z_LOG`.
///
/// Standard output stays reserved for 7-Zip and for listing results.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(console::colors_enabled_stderr())
        .with_target(false)
        .without_time()
        .try_init();
}
