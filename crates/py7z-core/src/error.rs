//! Error types for locating, invoking and parsing the 7-Zip executable.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `Py7zError`.
pub type Result<T> = std::result::Result<T, Py7zError>;

/// Why the executable could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The override variable names a path that is missing or not executable.
    InvalidOverride {
        /// The override value as given.
        path: PathBuf,
    },
    /// None of the candidate names exist on the search path.
    NotOnSearchPath {
        /// Candidate names that were tried, in order.
        candidates: Vec<String>,
    },
}

impl std::fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOverride { path } => {
                write!(f, "override '{}' is not an executable file", path.display())
            }
            Self::NotOnSearchPath { candidates } => {
                write!(f, "none of [{}] found on the search path", candidates.join(", "))
            }
        }
    }
}

/// Errors that can occur while driving the 7-Zip executable.
#[derive(Error, Debug)]
pub enum Py7zError {
    /// The executable could not be resolved.
    #[error("7-Zip executable not found: {reason}")]
    ExecutableNotFound {
        /// Why resolution failed.
        reason: NotFoundReason,
    },

    /// The child process could not be started.
    #[error("failed to launch {}: {source}", program.display())]
    InvocationFailed {
        /// Program that was being launched.
        program: PathBuf,
        /// Underlying launch error.
        #[source]
        source: std::io::Error,
    },

    /// The listing command exited with a non-zero status.
    #[error("7-Zip listing failed with exit code {code}: {message}")]
    ListingFailed {
        /// Exit code reported by the executable.
        code: i32,
        /// Captured diagnostic text.
        message: String,
    },

    /// Captured listing text did not match the expected layout.
    #[error("malformed listing output at line {line}: {reason}")]
    MalformedOutput {
        /// 1-based line number in the captured text (0 when at end of input).
        line: usize,
        /// What was expected.
        reason: String,
    },

    /// A friendly option received a value outside its accepted set.
    #[error("invalid {what}: '{value}'")]
    InvalidValue {
        /// Name of the option.
        what: &'static str,
        /// Rejected value.
        value: String,
    },

    /// Options were combined in a way the command cannot express.
    #[error("{0}")]
    InvalidUsage(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Py7zError {
    /// Creates an `InvalidValue` error.
    pub fn invalid_value(what: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            what,
            value: value.into(),
        }
    }

    /// Creates a `MalformedOutput` error.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedOutput {
            line,
            reason: reason.into(),
        }
    }

    /// Returns the process exit code this error maps to.
    ///
    /// Codes are distinct per error kind and chosen so they do not collide
    /// with the exit codes 7-Zip itself uses for warnings (1) and fatal
    /// errors (2 is shared with usage errors, matching clap).
    ///
    /// # Examples
    ///
    /// ```
    /// use py7z_core::Py7zError;
    ///
    /// let err = Py7zError::malformed(3, "missing summary line");
    /// assert_eq!(err.exit_code(), 4);
    /// ```
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::ExecutableNotFound { .. } => 127,
            Self::InvocationFailed { .. } => 126,
            Self::ListingFailed { .. } => 3,
            Self::MalformedOutput { .. } => 4,
            Self::InvalidValue { .. } | Self::InvalidUsage(_) => 2,
            Self::Io(_) => 1,
        }
    }

    /// Returns `true` if the error was raised before any process was spawned.
    #[must_use]
    pub const fn is_pre_launch(&self) -> bool {
        matches!(
            self,
            Self::ExecutableNotFound { .. } | Self::InvalidValue { .. } | Self::InvalidUsage(_)
        )
    }
}
