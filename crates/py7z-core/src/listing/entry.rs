//! Records produced by the listing parser.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

/// Whether an entry is a regular file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

impl EntryKind {
    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "dir",
        }
    }
}

impl FromStr for EntryKind {
    type Err = crate::Py7zError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" | "f" => Ok(Self::File),
            "dir" | "d" | "directory" => Ok(Self::Directory),
            _ => Err(crate::Py7zError::invalid_value("entry type", s)),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five-column `DRHSA` attribute block of a listing line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Attributes {
    /// `D`: directory.
    pub directory: bool,
    /// `R`: read-only.
    pub read_only: bool,
    /// `H`: hidden.
    pub hidden: bool,
    /// `S`: system.
    pub system: bool,
    /// `A`: archive bit.
    pub archive: bool,
}

impl Attributes {
    const LETTERS: [char; 5] = ['D', 'R', 'H', 'S', 'A'];

    /// Parses a block such as `D....` or `..H.A`.
    ///
    /// Each position holds either its letter or `.`; anything else is
    /// rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use py7z_core::listing::Attributes;
    ///
    /// let attrs = Attributes::parse("D...A").unwrap();
    /// assert!(attrs.directory && attrs.archive);
    /// assert!(Attributes::parse("DX...").is_none());
    /// ```
    #[must_use]
    pub fn parse(block: &str) -> Option<Self> {
        let chars: Vec<char> = block.chars().collect();
        if chars.len() != Self::LETTERS.len() {
            return None;
        }

        let mut flags = [false; 5];
        for (i, (c, letter)) in chars.iter().zip(Self::LETTERS).enumerate() {
            match *c {
                '.' => {}
                c if c == letter => flags[i] = true,
                _ => return None,
            }
        }

        let [directory, read_only, hidden, system, archive] = flags;
        Some(Self {
            directory,
            read_only,
            hidden,
            system,
            archive,
        })
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set = [
            self.directory,
            self.read_only,
            self.hidden,
            self.system,
            self.archive,
        ];
        for (on, letter) in set.into_iter().zip(Self::LETTERS) {
            write!(f, "{}", if on { letter } else { '.' })?;
        }
        Ok(())
    }
}

/// One entry of an archive listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path inside the archive, as printed by 7-Zip.
    pub path: String,
    /// File or directory, taken from the `D` attribute.
    pub kind: EntryKind,
    /// Uncompressed size; blank in the listing means unknown.
    pub size: Option<u64>,
    /// Packed size; blank for all but the first file of a solid block.
    pub compressed_size: Option<u64>,
    /// Modification time, when the format stores one.
    pub modified: Option<NaiveDateTime>,
    /// Attribute flags.
    pub attributes: Attributes,
}

impl ArchiveEntry {
    /// Returns `true` if this entry is a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Totals printed on the last line of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingSummary {
    /// Newest modification time.
    pub modified: Option<NaiveDateTime>,
    /// Total uncompressed size.
    pub size: Option<u64>,
    /// Total packed size.
    pub compressed_size: Option<u64>,
    /// Number of files.
    pub files: u64,
    /// Number of folders.
    pub folders: u64,
}

impl ListingSummary {
    /// Totals over `entries`; unknown sizes count as zero.
    #[must_use]
    pub fn from_entries(entries: &[ArchiveEntry]) -> Self {
        let folders = entries.iter().filter(|e| e.is_dir()).count() as u64;
        Self {
            modified: entries.iter().filter_map(|e| e.modified).max(),
            size: Some(entries.iter().filter_map(|e| e.size).sum()),
            compressed_size: Some(entries.iter().filter_map(|e| e.compressed_size).sum()),
            files: entries.len() as u64 - folders,
            folders,
        }
    }
}

/// Parsed result of `7z l`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveListing {
    /// `Key = Value` lines from the archive information block, in order.
    pub properties: Vec<(String, String)>,
    /// Entries in the order 7-Zip printed them.
    pub entries: Vec<ArchiveEntry>,
    /// Summary line totals.
    pub summary: ListingSummary,
}

impl ArchiveListing {
    /// Looks up an archive property by key, e.g. `"Type"`.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the archive type reported by 7-Zip.
    #[must_use]
    pub fn archive_type(&self) -> Option<&str> {
        self.property("Type")
    }

    /// Sum of the known entry sizes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.entries.iter().filter_map(|e| e.size).sum()
    }

    /// Keeps only entries of the given kind.
    ///
    /// The summary is recomputed from the entries that remain, so its counts
    /// and sizes describe what is left rather than the whole archive.
    pub fn retain_kind(&mut self, kind: EntryKind) {
        self.entries.retain(|e| e.kind == kind);
        self.summary = ListingSummary::from_entries(&self.entries);
    }
}
