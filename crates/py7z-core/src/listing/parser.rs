//! Parser for the table printed by `7z l`.
//!
//! The expected layout is:
//!
//! ```text
//! 7-Zip [64] 16.02 : Copyright (c) 1999-2016 Igor Pavlov : 2016-05-21
//!
//! Listing archive: docs.7z
//!
//! --
//! Path = docs.7z
//! Type = 7z
//!
//!    Date      Time    Attr         Size   Compressed  Name
//! ------------------- ----- ------------ ------------  ------------------------
//! 2024-01-15 10:30:00 D....            0            0  docs
//! 2024-01-15 10:30:00 ....A           12           64  docs/readme.txt
//! ------------------- ----- ------------ ------------  ------------------------
//! 2024-01-15 10:30:00                 12           64  1 files, 1 folders
//! ```
//!
//! Everything before the column header is preamble; `Key = Value` lines that
//! follow a dash-only line are collected as archive properties. The dash runs
//! of the separator under the header fix the column spans: the last run marks
//! where the name column starts, and names extend to the end of the line. A
//! size too wide for its column pushes the later columns right by the excess,
//! the way 7-Zip prints it. The entries end at the next separator, which must be followed by the summary
//! line. Anything after the summary is ignored.
//!
//! A listing that strays from this shape is rejected with
//! [`Py7zError::MalformedOutput`]; no attempt is made to guess a new layout.

use chrono::NaiveDateTime;

use crate::Py7zError;
use crate::Result;
use crate::listing::entry::ArchiveEntry;
use crate::listing::entry::ArchiveListing;
use crate::listing::entry::Attributes;
use crate::listing::entry::EntryKind;
use crate::listing::entry::ListingSummary;

const HEADER_COLUMNS: [&str; 6] = ["Date", "Time", "Attr", "Size", "Compressed", "Name"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Byte range of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
}

/// Fields of one table row that sit left of the name column.
#[derive(Debug, Clone, Copy)]
struct Row<'a> {
    modified: &'a str,
    attributes: &'a str,
    size: &'a str,
    compressed: &'a str,
    /// Text from the (possibly shifted) name column to the end of the line.
    rest: &'a str,
}

/// Column layout derived from the separator line.
#[derive(Debug, Clone, Copy)]
struct Columns {
    modified: Span,
    attributes: Span,
    size: Span,
    compressed: Span,
    name_start: usize,
}

impl Columns {
    fn from_separator(line: &str) -> Option<Self> {
        let runs = dash_runs(line);
        let [modified, attributes, size, compressed, name] = runs.as_slice() else {
            return None;
        };
        Some(Self {
            modified: *modified,
            attributes: *attributes,
            size: *size,
            compressed: *compressed,
            name_start: name.start,
        })
    }

    /// Returns the trimmed text of `span`, or `None` if the span does not fall
    /// on character boundaries.
    fn field(line: &str, span: Span) -> Option<&str> {
        let end = span.end.min(line.len());
        if span.start >= end {
            return Some("");
        }
        line.get(span.start..end).map(str::trim)
    }

    /// Splits `line` into its fields.
    ///
    /// 7-Zip right-aligns numbers in their columns; a number wider than its
    /// column runs on to the right and pushes every later column along with
    /// it. Each number is therefore read as the token that starts inside its
    /// span, and the spans after it move by the overflow. Returns `None` when
    /// anything other than blanks sits between fields.
    fn split<'a>(&self, line: &'a str) -> Option<Row<'a>> {
        if !is_blank(line, self.modified.end, self.attributes.start)
            || !is_blank(line, self.attributes.end, self.size.start)
        {
            return None;
        }
        let modified = Self::field(line, self.modified)?;
        let attributes = Self::field(line, self.attributes)?;

        let (size, size_end, shift) = number_token(line, self.size, 0)?;
        if !is_blank(line, size_end, self.compressed.start + shift) {
            return None;
        }
        let (compressed, compressed_end, shift) = number_token(line, self.compressed, shift)?;
        let name_start = self.name_start + shift;
        if !is_blank(line, compressed_end, name_start) {
            return None;
        }

        let rest = if name_start >= line.len() {
            ""
        } else {
            line.get(name_start..)?
        };
        Some(Row {
            modified,
            attributes,
            size,
            compressed,
            rest,
        })
    }
}

/// Returns `true` if bytes `from..to` of `line` are all spaces. The range is
/// clipped to the line.
fn is_blank(line: &str, from: usize, to: usize) -> bool {
    let to = to.min(line.len());
    from >= to
        || line
            .as_bytes()
            .get(from..to)
            .is_some_and(|gap| gap.iter().all(|&b| b == b' '))
}

/// Reads the number starting inside `span` moved right by `shift`.
///
/// Returns the token (empty for a blank column), the byte offset just past
/// it, and the shift to apply to the columns that follow.
fn number_token(line: &str, span: Span, shift: usize) -> Option<(&str, usize, usize)> {
    let start = span.start + shift;
    let end = span.end + shift;
    if start >= line.len() {
        return Some(("", start, shift));
    }
    let from_start = line.get(start..)?;
    let text = from_start.trim_start_matches(' ');
    let token_start = start + (from_start.len() - text.len());
    if token_start >= end {
        return Some(("", start, shift));
    }
    let token = text.split(' ').next().unwrap_or("");
    let token_end = token_start + token.len();
    Some((token, token_end, shift + token_end.saturating_sub(end)))
}

fn dash_runs(line: &str) -> Vec<Span> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, b) in line.bytes().enumerate() {
        match (b, start) {
            (b'-', None) => start = Some(i),
            (b'-', Some(_)) => {}
            (_, Some(s)) => {
                runs.push(Span { start: s, end: i });
                start = None;
            }
            (_, None) => {}
        }
    }
    if let Some(s) = start {
        runs.push(Span {
            start: s,
            end: line.len(),
        });
    }
    runs
}

fn is_separator(line: &str) -> bool {
    line.starts_with('-') && line.bytes().all(|b| b == b'-' || b == b' ')
}

fn is_column_header(line: &str) -> bool {
    line.split_whitespace().eq(HEADER_COLUMNS)
}

fn parse_property(line: &str) -> Option<(String, String)> {
    let (key, value) = line
        .split_once(" = ")
        .or_else(|| line.strip_suffix(" =").map(|key| (key, "")))?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

fn parse_timestamp(text: &str, line_no: usize) -> Result<Option<NaiveDateTime>> {
    if text.is_empty() {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map(Some)
        .map_err(|_| Py7zError::malformed(line_no, format!("invalid timestamp '{text}'")))
}

fn parse_number(text: &str, what: &str, line_no: usize) -> Result<Option<u64>> {
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<u64>()
        .map(Some)
        .map_err(|_| Py7zError::malformed(line_no, format!("invalid {what} '{text}'")))
}

fn split_row<'a>(line: &'a str, columns: &Columns, line_no: usize) -> Result<Row<'a>> {
    columns
        .split(line)
        .ok_or_else(|| Py7zError::malformed(line_no, "line does not match the column layout"))
}

fn parse_entry(line: &str, columns: &Columns, line_no: usize) -> Result<ArchiveEntry> {
    let row = split_row(line, columns, line_no)?;
    if row.rest.is_empty() {
        return Err(Py7zError::malformed(line_no, "entry has no name"));
    }

    let modified = parse_timestamp(row.modified, line_no)?;

    let attributes = if row.attributes.is_empty() {
        Attributes::default()
    } else {
        Attributes::parse(row.attributes).ok_or_else(|| {
            Py7zError::malformed(line_no, format!("invalid attributes '{}'", row.attributes))
        })?
    };

    let size = parse_number(row.size, "size", line_no)?;
    let compressed_size = parse_number(row.compressed, "compressed size", line_no)?;

    let kind = if attributes.directory {
        EntryKind::Directory
    } else {
        EntryKind::File
    };

    Ok(ArchiveEntry {
        path: row.rest.to_string(),
        kind,
        size,
        compressed_size,
        modified,
        attributes,
    })
}

fn parse_counts(text: &str) -> Option<(u64, u64)> {
    let mut files = None;
    let mut folders = None;
    for part in text.split(',') {
        let Some((count, word)) = part.trim().split_once(' ') else {
            continue;
        };
        let Ok(count) = count.parse::<u64>() else {
            continue;
        };
        if word.starts_with("file") {
            files = Some(count);
        } else if word.starts_with("folder") {
            folders = Some(count);
        }
    }
    if files.is_none() && folders.is_none() {
        return None;
    }
    Some((files.unwrap_or(0), folders.unwrap_or(0)))
}

fn parse_summary(line: &str, columns: &Columns, line_no: usize) -> Result<ListingSummary> {
    let row = split_row(line, columns, line_no)?;
    if !row.attributes.is_empty() {
        return Err(Py7zError::malformed(line_no, "summary line has attributes"));
    }
    let (files, folders) = parse_counts(row.rest).ok_or_else(|| {
        Py7zError::malformed(line_no, "summary line has no file or folder count")
    })?;

    Ok(ListingSummary {
        modified: parse_timestamp(row.modified, line_no)?,
        size: parse_number(row.size, "total size", line_no)?,
        compressed_size: parse_number(row.compressed, "total compressed size", line_no)?,
        files,
        folders,
    })
}

/// Parses the captured text of `7z l`.
///
/// Entries keep the order 7-Zip printed them in. See the module
/// documentation for the accepted layout.
///
/// # Errors
///
/// Returns [`Py7zError::MalformedOutput`] when the column header, either
/// separator, or the summary line is missing, or when an entry line cannot be
/// split into its fields. No partial result is returned.
///
/// # Examples
///
/// ```
/// use py7z_core::listing::parse_listing;
///
/// let text = "\
///    Date      Time    Attr         Size   Compressed  Name
/// ------------------- ----- ------------ ------------  ------------------------
/// 2024-01-15 10:30:00 ....A           12           64  readme.txt
/// ------------------- ----- ------------ ------------  ------------------------
/// 2024-01-15 10:30:00                 12           64  1 files
/// ";
/// let listing = parse_listing(text).unwrap();
/// assert_eq!(listing.entries[0].path, "readme.txt");
/// assert_eq!(listing.summary.files, 1);
/// ```
pub fn parse_listing(text: &str) -> Result<ArchiveListing> {
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));
    let mut listing = ArchiveListing::default();
    let mut in_properties = false;

    loop {
        let Some((_, line)) = lines.next() else {
            return Err(Py7zError::malformed(0, "column header line not found"));
        };
        if is_column_header(line) {
            break;
        }
        if is_separator(line) {
            in_properties = true;
        } else if in_properties && let Some(property) = parse_property(line) {
            listing.properties.push(property);
        }
    }

    let columns = match lines.next() {
        Some((line_no, line)) => Columns::from_separator(line).ok_or_else(|| {
            Py7zError::malformed(line_no, "expected a five-column separator after the header")
        })?,
        None => {
            return Err(Py7zError::malformed(
                0,
                "column separator not found after header",
            ));
        }
    };

    loop {
        let Some((line_no, line)) = lines.next() else {
            return Err(Py7zError::malformed(0, "closing separator line not found"));
        };
        if is_separator(line) {
            break;
        }
        listing.entries.push(parse_entry(line, &columns, line_no)?);
    }

    let Some((line_no, line)) = lines.next() else {
        return Err(Py7zError::malformed(0, "summary line not found"));
    };
    listing.summary = parse_summary(line, &columns, line_no)?;

    Ok(listing)
}
