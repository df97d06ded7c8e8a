//! Environment-derived settings.
//!
//! There is no configuration file. Everything this crate needs to know about
//! its environment is read once per invocation into a [`Settings`] value and
//! passed down explicitly, so tests can construct one without touching the
//! process environment.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable holding an explicit path to the 7-Zip executable.
pub const EXECUTABLE_ENV_VAR: &str = "PY7Z_7Z_PATH";

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "PY7Z_LOG";

/// Executable names tried on the search path, in order.
pub const DEFAULT_CANDIDATES: [&str; 3] = ["7z", "7zz", "7za"];

/// Settings controlling how the executable is located.
///
/// # Examples
///
/// ```
/// use py7z_core::Settings;
///
/// let settings = Settings {
///     executable_override: Some("/opt/7zip/7zz".into()),
///     ..Settings::default()
/// };
/// assert!(settings.executable_override.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Settings {
    /// Explicit executable path. Never searched for on `PATH`.
    pub executable_override: Option<PathBuf>,

    /// Search path used when no override is set. `None` means the process
    /// `PATH`.
    pub search_path: Option<OsString>,

    /// Directory relative override paths are resolved against. `None` means
    /// the process working directory.
    pub working_dir: Option<PathBuf>,

    /// Executable names looked up on the search path.
    pub candidates: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            executable_override: None,
            search_path: None,
            working_dir: None,
            candidates: DEFAULT_CANDIDATES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// An empty `PY7Z_7Z_PATH` is treated the same as an unset one.
    #[must_use]
    pub fn from_env() -> Self {
        let executable_override = env::var_os(EXECUTABLE_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Self {
            executable_override,
            search_path: env::var_os("PATH"),
            ..Self::default()
        }
    }
}
