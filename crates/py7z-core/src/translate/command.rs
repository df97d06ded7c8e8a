//! Commands and their translation into 7-Zip arguments.

use std::ffi::OsStr;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use crate::Py7zError;
use crate::Result;

use super::options::HashAlgorithm;
use super::switch::Flag;
use super::switch::Switch;

/// Marker separating switches from operands on the 7-Zip command line.
pub const END_OF_SWITCHES: &str = "--";

const PASSWORD_PREFIX: &str = "-p";

/// A 7-Zip command, always the first argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Add files to an archive (`a`).
    Add,
    /// Extract with full paths (`x`).
    Extract,
    /// List contents (`l`).
    List,
    /// Hash files (`h`).
    Hash,
    /// Test archive integrity (`t`).
    Test,
}

impl Operation {
    /// Returns the positional keyword 7-Zip expects.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Add => "a",
            Self::Extract => "x",
            Self::List => "l",
            Self::Hash => "h",
            Self::Test => "t",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Extract => "extract",
            Self::List => "list",
            Self::Hash => "hash",
            Self::Test => "test",
        };
        f.write_str(name)
    }
}

/// What the caller asked for: an operation, flags in the order given, and
/// operands.
///
/// # Examples
///
/// ```
/// use py7z_core::translate::CommandSpec;
/// use py7z_core::translate::Operation;
/// use py7z_core::translate::Switch;
///
/// let spec = CommandSpec::new(Operation::Extract)
///     .with_switch(Switch::OutputDir("/tmp/x".into()))
///     .with_operand("archive.7z");
/// let args = spec.translate();
/// assert_eq!(args.as_slice()[0], "x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Operation to perform.
    pub operation: Operation,
    /// Flags, in the order the caller supplied them.
    pub flags: Vec<Flag>,
    /// Archive path followed by file operands.
    pub operands: Vec<OsString>,
}

impl CommandSpec {
    /// Creates a command with no flags and no operands.
    #[must_use]
    pub const fn new(operation: Operation) -> Self {
        Self {
            operation,
            flags: Vec::new(),
            operands: Vec::new(),
        }
    }

    /// Appends a recognised switch.
    pub fn with_switch(mut self, switch: Switch) -> Self {
        self.flags.push(Flag::Known(switch));
        self
    }

    /// Appends a flag.
    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    /// Appends an operand.
    pub fn with_operand(mut self, operand: impl Into<OsString>) -> Self {
        self.operands.push(operand.into());
        self
    }

    /// Appends several operands.
    pub fn with_operands<I, S>(mut self, operands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.operands.extend(operands.into_iter().map(Into::into));
        self
    }

    /// Produces the argument list for 7-Zip.
    ///
    /// The layout is fixed: operation keyword, flag tokens in caller order,
    /// `--`, then operands. The `--` is omitted when there are no operands so
    /// that `-si` style invocations stay valid.
    #[must_use]
    pub fn translate(&self) -> ArgumentSequence {
        let mut args = Vec::with_capacity(self.flags.len() + self.operands.len() + 2);
        args.push(OsString::from(self.operation.keyword()));
        args.extend(self.flags.iter().map(Flag::token));
        if !self.operands.is_empty() {
            args.push(OsString::from(END_OF_SWITCHES));
            args.extend(self.operands.iter().cloned());
        }
        ArgumentSequence(args)
    }
}

/// The exact arguments handed to the 7-Zip executable, program name excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSequence(Vec<OsString>);

impl ArgumentSequence {
    /// Returns the arguments as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[OsString] {
        &self.0
    }

    /// Returns the operation keyword.
    #[must_use]
    pub fn operation(&self) -> Option<&OsStr> {
        self.0.first().map(OsString::as_os_str)
    }

    /// Consumes the sequence.
    #[must_use]
    pub fn into_vec(self) -> Vec<OsString> {
        self.0
    }

    /// Iterates over the arguments.
    pub fn iter(&self) -> impl Iterator<Item = &OsStr> {
        self.0.iter().map(OsString::as_os_str)
    }

    /// Displays the arguments with password values masked, for logging.
    ///
    /// Every `-p…` switch before `--` is shown as `-p***`; operands are left
    /// alone.
    #[must_use]
    pub const fn redacted(&self) -> Redacted<'_> {
        Redacted(self)
    }
}

/// Log-safe rendering of an [`ArgumentSequence`], see
/// [`ArgumentSequence::redacted`].
#[derive(Debug, Clone, Copy)]
pub struct Redacted<'a>(&'a ArgumentSequence);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut in_switches = true;
        for (i, arg) in self.0.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            let arg = arg.to_string_lossy();
            if arg == END_OF_SWITCHES {
                in_switches = false;
            }
            if in_switches && i > 0 && arg.starts_with(PASSWORD_PREFIX) {
                write!(f, "{PASSWORD_PREFIX}***")?;
            } else {
                f.write_str(&arg)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ArgumentSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Options for hashing files, or the contents of one archive.
#[derive(Debug, Clone, Default)]
pub struct HashRequest {
    /// Hash function.
    pub algorithm: HashAlgorithm,
    /// Keep 7-Zip's table formatting.
    pub verbose: bool,
    /// Keep 7-Zip's progress indicator.
    pub show_progress: bool,
    /// Hash the files inside the single archive given in `files`.
    pub archive_contents: bool,
    /// Files to hash; empty means standard input.
    pub files: Vec<PathBuf>,
}

impl HashRequest {
    /// Builds the command for this request.
    ///
    /// # Errors
    ///
    /// Returns [`Py7zError::InvalidUsage`] if `archive_contents` is set and
    /// `files` does not hold exactly one path.
    pub fn to_command(&self) -> Result<CommandSpec> {
        let mut spec = if self.archive_contents {
            if self.files.len() != 1 {
                return Err(Py7zError::InvalidUsage(
                    "exactly 1 file must be specified when hashing archive contents".to_string(),
                ));
            }
            CommandSpec::new(Operation::Test).with_switch(Switch::TechnicalListing)
        } else {
            CommandSpec::new(Operation::Hash)
        };

        if !self.verbose {
            spec = spec.with_switch(Switch::BareOutput);
        }
        if !self.show_progress {
            spec = spec
                .with_switch(Switch::DisableProgressIndicator)
                .with_switch(Switch::Progress(false));
        }
        spec = spec.with_switch(Switch::HashAlgorithm(self.algorithm));

        if self.files.is_empty() {
            spec = spec.with_switch(Switch::ReadFromStdin);
        } else {
            spec = spec.with_operands(self.files.iter().cloned());
        }
        Ok(spec)
    }
}
