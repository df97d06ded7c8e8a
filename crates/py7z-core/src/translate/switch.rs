//! Friendly flags and the 7-Zip switch each one becomes.

use std::ffi::OsString;
use std::path::PathBuf;

use super::options::ArchiveFormat;
use super::options::CompressionLevel;
use super::options::CompressionMethod;
use super::options::ConsoleCharset;
use super::options::DictionarySize;
use super::options::HashAlgorithm;
use super::options::ListfileCharset;
use super::options::OverwriteMode;
use super::options::SolidBlockSize;
use super::options::ThreadCount;
use super::options::Timestamp;

/// Highest `-bb` output log level 7-Zip understands.
pub const MAX_VERBOSITY: u8 = 3;

/// Whether a file filter adds or removes entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// `-i`
    Include,
    /// `-x`
    Exclude,
}

/// A wildcard or list-file filter (`-i`/`-x`).
///
/// A pattern starting with `@` names a list file and is passed as-is; any
/// other pattern is a wildcard and gets the `!` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Include or exclude.
    pub kind: FilterKind,
    /// Apply the pattern in every subdirectory (`r` modifier).
    pub recursive: bool,
    /// Wildcard, or `@listfile`.
    pub pattern: String,
}

impl Filter {
    /// Creates a filter.
    pub fn new(kind: FilterKind, recursive: bool, pattern: impl Into<String>) -> Self {
        Self {
            kind,
            recursive,
            pattern: pattern.into(),
        }
    }

    fn token(&self) -> String {
        let flag = match self.kind {
            FilterKind::Include => 'i',
            FilterKind::Exclude => 'x',
        };
        let recurse = if self.recursive { "r" } else { "" };
        if self.pattern.starts_with('@') {
            format!("-{flag}{recurse}{}", self.pattern)
        } else {
            format!("-{flag}{recurse}!{}", self.pattern)
        }
    }
}

/// A recognised friendly option. Each one maps to exactly one 7-Zip token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Switch {
    /// `-t{format}`
    ArchiveFormat(ArchiveFormat),
    /// `-mm={method}`
    CompressionMethod(CompressionMethod),
    /// `-mx={level}`
    CompressionLevel(CompressionLevel),
    /// `-mmt={threads}`
    Threads(ThreadCount),
    /// `-mt{a,c,m}=on`
    StoreTimestamp(Timestamp),
    /// `-mhc=on|off`
    CompressHeader(bool),
    /// `-mhe=on|off`
    EncryptHeader(bool),
    /// `-ms={size}`
    SolidBlockSize(SolidBlockSize),
    /// `-md={size}`
    DictionarySize(DictionarySize),
    /// `-sdel`
    DeleteAfterCompression,
    /// `-si`
    ReadFromStdin,
    /// `-so`
    WriteToStdout,
    /// `-bb{level}`, capped at [`MAX_VERBOSITY`].
    Verbosity(u8),
    /// `-bsp1` / `-bsp0`
    Progress(bool),
    /// `-snl`
    StoreSymlinks,
    /// `-o{dir}`
    OutputDir(PathBuf),
    /// `-r` / `-r-`
    Recurse(bool),
    /// `-i…` / `-x…`
    Filter(Filter),
    /// `-an`
    IgnoreArchiveName,
    /// `-scc{charset}`
    ConsoleCharset(ConsoleCharset),
    /// `-scs{charset}`
    ListfileCharset(ListfileCharset),
    /// `-spd`
    DisableWildcards,
    /// `-sse`
    FailOnBadFile,
    /// `-ao{mode}`
    Overwrite(OverwriteMode),
    /// `-p{password}`
    Password(String),
    /// `-scrc{algorithm}`
    HashAlgorithm(HashAlgorithm),
    /// `-ba`
    BareOutput,
    /// `-bd`
    DisableProgressIndicator,
    /// `-slt`
    TechnicalListing,
}

impl Switch {
    /// Returns the 7-Zip token for this switch.
    ///
    /// # Examples
    ///
    /// ```
    /// use py7z_core::translate::Switch;
    ///
    /// assert_eq!(Switch::Recurse(false).token(), "-r-");
    /// assert_eq!(Switch::Verbosity(7).token(), "-bb3");
    /// ```
    #[must_use]
    pub fn token(&self) -> OsString {
        match self {
            Self::ArchiveFormat(format) => format!("-t{}", format.native()).into(),
            Self::CompressionMethod(method) => format!("-mm={}", method.native()).into(),
            Self::CompressionLevel(level) => format!("-mx={}", level.native()).into(),
            Self::Threads(threads) => format!("-mmt={threads}").into(),
            Self::StoreTimestamp(ts) => format!("-mt{}=on", ts.native()).into(),
            Self::CompressHeader(on) => format!("-mhc={}", on_off(*on)).into(),
            Self::EncryptHeader(on) => format!("-mhe={}", on_off(*on)).into(),
            Self::SolidBlockSize(size) => format!("-ms={size}").into(),
            Self::DictionarySize(size) => format!("-md={}", size.0).into(),
            Self::DeleteAfterCompression => "-sdel".into(),
            Self::ReadFromStdin => "-si".into(),
            Self::WriteToStdout => "-so".into(),
            Self::Verbosity(level) => format!("-bb{}", (*level).min(MAX_VERBOSITY)).into(),
            Self::Progress(on) => (if *on { "-bsp1" } else { "-bsp0" }).into(),
            Self::StoreSymlinks => "-snl".into(),
            Self::OutputDir(dir) => {
                // Paths may not be UTF-8; build the token without a lossy step.
                let mut token = OsString::from("-o");
                token.push(dir.as_os_str());
                token
            }
            Self::Recurse(on) => (if *on { "-r" } else { "-r-" }).into(),
            Self::Filter(filter) => filter.token().into(),
            Self::IgnoreArchiveName => "-an".into(),
            Self::ConsoleCharset(charset) => format!("-scc{}", charset.native()).into(),
            Self::ListfileCharset(charset) => format!("-scs{}", charset.native()).into(),
            Self::DisableWildcards => "-spd".into(),
            Self::FailOnBadFile => "-sse".into(),
            Self::Overwrite(mode) => format!("-ao{}", mode.native()).into(),
            Self::Password(password) => format!("-p{password}").into(),
            Self::HashAlgorithm(algorithm) => format!("-scrc{}", algorithm.native()).into(),
            Self::BareOutput => "-ba".into(),
            Self::DisableProgressIndicator => "-bd".into(),
            Self::TechnicalListing => "-slt".into(),
        }
    }
}

const fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

/// One option occurrence as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flag {
    /// A recognised friendly option.
    Known(Switch),
    /// A native switch forwarded verbatim; 7-Zip decides whether it is valid.
    Unknown(OsString),
}

impl Flag {
    /// Returns the token passed to 7-Zip.
    #[must_use]
    pub fn token(&self) -> OsString {
        match self {
            Self::Known(switch) => switch.token(),
            Self::Unknown(raw) => raw.clone(),
        }
    }
}

impl From<Switch> for Flag {
    fn from(switch: Switch) -> Self {
        Self::Known(switch)
    }
}
