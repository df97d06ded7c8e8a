//! Archive listing through `7z l`.
//!
//! The listing is captured rather than shown, parsed into
//! [`ArchiveListing`], and handed back for the caller to render.
//!
//! # Examples
//!
//! ```no_run
//! use py7z_core::ProcessRunner;
//! use py7z_core::Settings;
//! use py7z_core::listing::ListRequest;
//! use py7z_core::listing::list_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let runner = ProcessRunner::new(Settings::from_env());
//! let listing = list_archive(&runner, &ListRequest::new("backup.7z"))?;
//! for entry in &listing.entries {
//!     println!("{}", entry.path);
//! }
//! # Ok(())
//! # }
//! ```

mod entry;
mod parser;

pub use entry::ArchiveEntry;
pub use entry::ArchiveListing;
pub use entry::Attributes;
pub use entry::EntryKind;
pub use entry::ListingSummary;
pub use parser::parse_listing;

use std::borrow::Cow;
use std::path::PathBuf;

use tracing::debug;
use tracing::warn;

use crate::Py7zError;
use crate::Result;
use crate::runner::CapturedOutput;
use crate::runner::Runner;
use crate::translate::CommandSpec;
use crate::translate::ConsoleCharset;
use crate::translate::Filter;
use crate::translate::FilterKind;
use crate::translate::Operation;
use crate::translate::Switch;

/// What to list and how to narrow it.
#[derive(Debug, Clone)]
pub struct ListRequest {
    /// Archive to list.
    pub archive: PathBuf,
    /// Wildcards forwarded to 7-Zip as recursive `-ir!` filters.
    pub include: Vec<String>,
    /// Wildcards forwarded to 7-Zip as recursive `-xr!` filters.
    pub exclude: Vec<String>,
    /// Password for archives with encrypted headers.
    pub password: Option<String>,
    /// Keep only entries of this kind after parsing.
    pub kind: Option<EntryKind>,
}

impl ListRequest {
    /// Creates a request for `archive` with no filters.
    pub fn new(archive: impl Into<PathBuf>) -> Self {
        Self {
            archive: archive.into(),
            include: Vec::new(),
            exclude: Vec::new(),
            password: None,
            kind: None,
        }
    }

    /// Builds the `7z l` command.
    ///
    /// Progress output is disabled and console output is forced to UTF-8 so
    /// the captured text decodes predictably.
    #[must_use]
    pub fn to_command(&self) -> CommandSpec {
        let mut spec = CommandSpec::new(Operation::List)
            .with_switch(Switch::DisableProgressIndicator)
            .with_switch(Switch::ConsoleCharset(ConsoleCharset::Utf8));

        for pattern in &self.include {
            spec = spec.with_switch(Switch::Filter(Filter::new(
                FilterKind::Include,
                true,
                pattern.as_str(),
            )));
        }
        for pattern in &self.exclude {
            spec = spec.with_switch(Switch::Filter(Filter::new(
                FilterKind::Exclude,
                true,
                pattern.as_str(),
            )));
        }
        if let Some(password) = &self.password {
            spec = spec.with_switch(Switch::Password(password.clone()));
        }

        spec.with_operand(self.archive.clone())
    }
}

/// Decodes captured bytes, replacing invalid UTF-8 rather than failing.
fn decode<'a>(bytes: &'a [u8], stream: &str) -> Cow<'a, str> {
    let text = String::from_utf8_lossy(bytes);
    if matches!(text, Cow::Owned(_)) {
        warn!(stream, "7-Zip output is not valid UTF-8; invalid bytes were replaced");
    }
    text
}

fn failure_message(captured: &CapturedOutput) -> String {
    let stderr = decode(&captured.stderr, "stderr");
    let message = if stderr.trim().is_empty() {
        decode(&captured.stdout, "stdout")
    } else {
        stderr
    };
    message.trim().to_string()
}

/// Runs `7z l` on the requested archive and parses the result.
///
/// Exactly one process is started; nothing is retried.
///
/// # Errors
///
/// - [`Py7zError::ExecutableNotFound`] if 7-Zip cannot be resolved.
/// - [`Py7zError::InvocationFailed`] if the process cannot start.
/// - [`Py7zError::ListingFailed`] if 7-Zip exits non-zero; the output is
///   not parsed.
/// - [`Py7zError::MalformedOutput`] if the output does not have the expected
///   table layout.
pub fn list_archive<R: Runner + ?Sized>(runner: &R, request: &ListRequest) -> Result<ArchiveListing> {
    let exe = runner.locate()?;
    let args = request.to_command().translate();
    debug!(
        program = %exe.path().display(),
        args = %args.redacted(),
        "listing archive"
    );

    let captured = runner.invoke_capturing(&exe, &args)?;
    if !captured.success() {
        return Err(Py7zError::ListingFailed {
            code: captured.code,
            message: failure_message(&captured),
        });
    }

    let text = decode(&captured.stdout, "stdout");
    let mut listing = parse_listing(&text)?;
    debug!(entries = listing.entries.len(), "parsed listing");

    if let Some(kind) = request.kind {
        listing.retain_kind(kind);
    }
    Ok(listing)
}
