//! Typed values accepted by friendly options.
//!
//! Every type here parses case-insensitively from the spelling a user types
//! and knows the exact text 7-Zip expects in the corresponding switch.

use std::fmt;
use std::str::FromStr;

use crate::Py7zError;

/// Declares a closed keyword set with its user spelling and 7-Zip spelling.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $user:literal, $native:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every accepted spelling, in declaration order.
            pub const NAMES: &'static [&'static str] = &[$($user),+];

            /// Returns the spelling used on the py7z command line.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $user, )+
                }
            }

            /// Returns the spelling 7-Zip expects inside a switch.
            #[must_use]
            pub const fn native(self) -> &'static str {
                match self {
                    $( Self::$variant => $native, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = Py7zError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $( $user => Ok(Self::$variant), )+
                    _ => Err(Py7zError::invalid_value($what, s)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum! {
    /// Archive type selected with `-t`.
    ArchiveFormat, "archive format" {
        /// Native 7z container.
        SevenZ => "7z", "7z";
        /// XZ stream.
        Xz => "xz", "xz";
        /// BZIP2 stream.
        Bzip2 => "bzip2", "bzip2";
        /// GZIP stream.
        Gzip => "gzip", "gzip";
        /// Tape archive.
        Tar => "tar", "tar";
        /// ZIP container.
        Zip => "zip", "zip";
        /// Windows imaging format.
        Wim => "wim", "wim";
    }
}

keyword_enum! {
    /// Compression method selected with `-mm=`.
    CompressionMethod, "compression method" {
        /// No compression.
        Copy => "copy", "Copy";
        /// Deflate.
        Deflate => "deflate", "Deflate";
        /// Deflate64.
        Deflate64 => "deflate64", "Deflate64";
        /// BZip2.
        Bzip2 => "bzip2", "BZip2";
        /// LZMA.
        Lzma => "lzma", "LZMA";
        /// LZMA2.
        Lzma2 => "lzma2", "LZMA2";
        /// PPMd.
        Ppmd => "ppmd", "PPMd";
    }
}

keyword_enum! {
    /// Compression level selected with `-mx=`.
    CompressionLevel, "compression level" {
        /// Store only.
        Store => "0", "0";
        /// Fastest.
        Fastest => "1", "1";
        /// Fast.
        Fast => "3", "3";
        /// Normal.
        Normal => "5", "5";
        /// Maximum.
        Maximum => "7", "7";
        /// Ultra.
        Ultra => "9", "9";
    }
}

keyword_enum! {
    /// File timestamp that can be stored in the archive.
    Timestamp, "timestamp" {
        /// Last access time (`-mta`).
        Access => "access", "a";
        /// Creation time (`-mtc`).
        Creation => "creation", "c";
        /// Last modification time (`-mtm`).
        Modified => "modified", "m";
    }
}

keyword_enum! {
    /// Behaviour when an extracted file already exists (`-ao`).
    OverwriteMode, "overwrite mode" {
        /// Overwrite without prompting.
        Yes => "yes", "a";
        /// Keep the existing file.
        SkipExisting => "skip-existing", "s";
        /// Rename the extracted file.
        RenameExtracted => "rename-extracted", "u";
        /// Rename the existing file.
        RenameExisting => "rename-existing", "t";
    }
}

keyword_enum! {
    /// Character set for console output (`-scc`).
    ConsoleCharset, "console charset" {
        /// UTF-8.
        Utf8 => "utf-8", "UTF-8";
        /// Windows ANSI code page.
        Win => "win", "WIN";
        /// DOS OEM code page.
        Dos => "dos", "DOS";
    }
}

keyword_enum! {
    /// Character set for list files (`-scs`).
    ListfileCharset, "listfile charset" {
        /// UTF-8.
        Utf8 => "utf-8", "UTF-8";
        /// UTF-16 little endian.
        Utf16Le => "utf-16le", "UTF-16LE";
        /// UTF-16 big endian.
        Utf16Be => "utf-16be", "UTF-16BE";
        /// Windows ANSI code page.
        Win => "win", "WIN";
        /// DOS OEM code page.
        Dos => "dos", "DOS";
    }
}

keyword_enum! {
    /// Hash function used by the `h` command (`-scrc`).
    HashAlgorithm, "hash algorithm" {
        /// BLAKE2sp.
        Blake2sp => "blake2sp", "blake2sp";
        /// CRC-32.
        Crc32 => "crc32", "crc32";
        /// CRC-64.
        Crc64 => "crc64", "crc64";
        /// MD5.
        Md5 => "md5", "md5";
        /// SHA-1.
        Sha1 => "sha1", "sha1";
        /// SHA-256.
        Sha256 => "sha256", "sha256";
        /// SHA-384.
        Sha384 => "sha384", "sha384";
        /// SHA-512.
        Sha512 => "sha512", "sha512";
        /// SHA3-256.
        Sha3_256 => "sha3-256", "sha3-256";
        /// XXH64.
        Xxh64 => "xxh64", "xxh64";
    }
}

impl Default for HashAlgorithm {
    fn default() -> Self {
        Self::Sha256
    }
}

/// Thread count for `-mmt=`: `off`, `on` or an explicit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadCount {
    /// Single-threaded.
    Off,
    /// Let 7-Zip choose.
    On,
    /// Explicit number of threads.
    Count(u32),
}

impl FromStr for ThreadCount {
    type Err = Py7zError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "on" => Ok(Self::On),
            other => other
                .parse::<u32>()
                .map(Self::Count)
                .map_err(|_| Py7zError::invalid_value("thread count", s)),
        }
    }
}

impl fmt::Display for ThreadCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::On => f.write_str("on"),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

/// A size written as digits followed by one of `b`, `k`, `m`, `g`, `t`.
///
/// The text is kept as typed (lower-cased) since 7-Zip parses it itself.
///
/// # Examples
///
/// ```
/// use py7z_core::translate::SizeSpec;
///
/// let size: SizeSpec = "64M".parse().unwrap();
/// assert_eq!(size.as_str(), "64m");
/// assert!("64".parse::<SizeSpec>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeSpec(String);

impl SizeSpec {
    /// Returns the normalised text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn parse_as(s: &str, what: &'static str) -> Result<Self, Py7zError> {
        let lower = s.to_ascii_lowercase();
        let valid = lower
            .strip_suffix(['b', 'k', 'm', 'g', 't'])
            .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()));
        if valid {
            Ok(Self(lower))
        } else {
            Err(Py7zError::invalid_value(what, s))
        }
    }
}

impl FromStr for SizeSpec {
    type Err = Py7zError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_as(s, "size")
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dictionary size for `-md=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionarySize(pub SizeSpec);

impl FromStr for DictionarySize {
    type Err = Py7zError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SizeSpec::parse_as(s, "dictionary size").map(Self)
    }
}

/// Solid block size for `-ms=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolidBlockSize {
    /// Non-solid archive (`none`).
    Off,
    /// One solid block (`solid`).
    On,
    /// Solid blocks of the given size.
    Size(SizeSpec),
}

impl FromStr for SolidBlockSize {
    type Err = Py7zError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::Off),
            "solid" => Ok(Self::On),
            _ => SizeSpec::parse_as(s, "solid block size").map(Self::Size),
        }
    }
}

impl fmt::Display for SolidBlockSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::On => f.write_str("on"),
            Self::Size(size) => size.fmt(f),
        }
    }
}
