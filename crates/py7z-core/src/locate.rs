//! Resolution of the 7-Zip executable.

use std::env;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

use crate::Py7zError;
use crate::Result;
use crate::Settings;
use crate::error::NotFoundReason;

/// A resolved path to the 7-Zip executable.
///
/// Created once per invocation and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SevenZip {
    path: PathBuf,
}

impl SevenZip {
    /// Wraps an already-resolved path without checking it.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the executable path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Resolves the executable described by `settings`.
///
/// When an override is set it must name an executable file and the search
/// path is never consulted.
///
/// # Errors
///
/// Returns [`Py7zError::ExecutableNotFound`] if the override is not an
/// executable file, or if no override is set and none of the candidate names
/// exist on the search path.
///
/// # Examples
///
/// ```no_run
/// use py7z_core::Settings;
/// use py7z_core::locate;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let seven_zip = locate(&Settings::from_env())?;
/// println!("using {}", seven_zip.path().display());
/// # Ok(())
/// # }
/// ```
pub fn locate(settings: &Settings) -> Result<SevenZip> {
    let working_dir = match &settings.working_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir()?,
    };

    if let Some(path) = &settings.executable_override {
        return locate_override(path, &working_dir);
    }

    let search_path = settings.search_path.clone().or_else(|| env::var_os("PATH"));

    for candidate in &settings.candidates {
        if let Ok(found) = which::which_in(candidate, search_path.as_ref(), &working_dir) {
            debug!(path = %found.display(), "found 7-Zip on search path");
            return Ok(SevenZip::from_path(found));
        }
    }

    Err(Py7zError::ExecutableNotFound {
        reason: NotFoundReason::NotOnSearchPath {
            candidates: settings.candidates.clone(),
        },
    })
}

fn locate_override(path: &Path, working_dir: &Path) -> Result<SevenZip> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        working_dir.join(path)
    };

    // An absolute path is checked in place by `which`, never searched for.
    match which::which(&absolute) {
        Ok(found) => {
            debug!(path = %found.display(), "using 7-Zip from override");
            Ok(SevenZip::from_path(found))
        }
        Err(_) => Err(Py7zError::ExecutableNotFound {
            reason: NotFoundReason::InvalidOverride {
                path: path.to_path_buf(),
            },
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tempfile::TempDir;

    fn empty_search_path(temp: &TempDir) -> Settings {
        Settings {
            search_path: Some(OsString::from(temp.path())),
            working_dir: Some(temp.path().to_path_buf()),
            ..Settings::default()
        }
    }

    #[test]
    fn test_missing_override_is_not_found() {
        let temp = TempDir::new().unwrap();
        let settings = Settings {
            executable_override: Some(temp.path().join("does-not-exist")),
            ..empty_search_path(&temp)
        };
        let err = locate(&settings).unwrap_err();
        assert!(matches!(
            err,
            Py7zError::ExecutableNotFound {
                reason: NotFoundReason::InvalidOverride { .. }
            }
        ));
    }

    #[test]
    fn test_empty_search_path_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = locate(&empty_search_path(&temp)).unwrap_err();
        assert!(matches!(
            err,
            Py7zError::ExecutableNotFound {
                reason: NotFoundReason::NotOnSearchPath { .. }
            }
        ));
    }

    #[test]
    fn test_directory_override_is_not_found() {
        let temp = TempDir::new().unwrap();
        let settings = Settings {
            executable_override: Some(temp.path().to_path_buf()),
            ..empty_search_path(&temp)
        };
        assert!(locate(&settings).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_relative_override_resolves_against_working_dir() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let exe = temp.path().join("my7z");
        std::fs::write(&exe, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();

        let settings = Settings {
            executable_override: Some(PathBuf::from("my7z")),
            ..empty_search_path(&temp)
        };
        let found = locate(&settings).unwrap();
        assert!(found.path().ends_with("my7z"));
    }
}
