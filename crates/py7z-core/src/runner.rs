//! Process execution seam.
//!
//! Everything that touches the real 7-Zip binary goes through [`Runner`], so
//! translation and parsing can be exercised with a fake that returns canned
//! output and exit codes.

use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;

use tracing::debug;
use tracing::info;

use crate::Py7zError;
use crate::Result;
use crate::Settings;
use crate::locate::SevenZip;
use crate::locate::locate;
use crate::translate::ArgumentSequence;
use crate::translate::CommandSpec;

/// Exit code reported when the child ended without one (e.g. killed on a
/// platform without signal numbers).
const UNKNOWN_EXIT_CODE: i32 = 1;

/// Output collected from a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Exit code of the child.
    pub code: i32,
    /// Raw standard output.
    pub stdout: Vec<u8>,
    /// Raw standard error.
    pub stderr: Vec<u8>,
}

impl CapturedOutput {
    /// Returns `true` if the child exited with code 0.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.code == 0
    }
}

/// Launches the 7-Zip executable.
pub trait Runner {
    /// Resolves the executable.
    fn locate(&self) -> Result<SevenZip>;

    /// Runs with inherited standard streams and returns the exit code.
    ///
    /// A non-zero exit code is not an error.
    fn invoke(&self, exe: &SevenZip, args: &ArgumentSequence) -> Result<i32>;

    /// Runs with standard output and error captured and standard input
    /// closed.
    fn invoke_capturing(&self, exe: &SevenZip, args: &ArgumentSequence)
    -> Result<CapturedOutput>;
}

/// [`Runner`] backed by real child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    settings: Settings,
}

impl ProcessRunner {
    /// Creates a runner that locates 7-Zip according to `settings`.
    #[must_use]
    pub const fn new(settings: Settings) -> Self {
        Self { settings }
    }

    fn command(exe: &SevenZip, args: &ArgumentSequence) -> Command {
        let mut cmd = Command::new(exe.path());
        cmd.args(args.iter());
        cmd
    }

    fn launch_error(exe: &SevenZip, source: std::io::Error) -> Py7zError {
        Py7zError::InvocationFailed {
            program: exe.path().to_path_buf(),
            source,
        }
    }
}

impl Runner for ProcessRunner {
    fn locate(&self) -> Result<SevenZip> {
        locate(&self.settings)
    }

    fn invoke(&self, exe: &SevenZip, args: &ArgumentSequence) -> Result<i32> {
        let status = Self::command(exe, args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Self::launch_error(exe, e))?;
        Ok(exit_code(status))
    }

    fn invoke_capturing(
        &self,
        exe: &SevenZip,
        args: &ArgumentSequence,
    ) -> Result<CapturedOutput> {
        let output = Self::command(exe, args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Self::launch_error(exe, e))?;
        Ok(CapturedOutput {
            code: exit_code(output.status),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Converts a child's status into a shell-style exit code.
///
/// On Unix a child terminated by signal `N` reports `128 + N`.
#[must_use]
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    UNKNOWN_EXIT_CODE
}

/// Locates 7-Zip, translates `spec` and runs it with live standard streams.
///
/// Returns 7-Zip's own exit code, whatever it is.
///
/// # Errors
///
/// Returns [`Py7zError::ExecutableNotFound`] if the executable cannot be
/// resolved (nothing is spawned), or [`Py7zError::InvocationFailed`] if the
/// process cannot be started.
///
/// # Examples
///
/// ```no_run
/// use py7z_core::ProcessRunner;
/// use py7z_core::Settings;
/// use py7z_core::run_command;
/// use py7z_core::translate::CommandSpec;
/// use py7z_core::translate::Operation;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let runner = ProcessRunner::new(Settings::from_env());
/// let spec = CommandSpec::new(Operation::Extract).with_operand("archive.7z");
/// let code = run_command(&runner, &spec)?;
/// std::process::exit(code);
/// # }
/// ```
pub fn run_command<R: Runner + ?Sized>(runner: &R, spec: &CommandSpec) -> Result<i32> {
    let exe = runner.locate()?;
    let args = spec.translate();

    info!(
        program = %exe.path().display(),
        args = %args.redacted(),
        "executing 7-Zip"
    );

    let code = runner.invoke(&exe, &args)?;
    debug!(code, "7-Zip exited");
    Ok(code)
}
