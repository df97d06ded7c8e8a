//! Plain-text listing output for people and shell pipelines.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use py7z_core::ArchiveListing;
use py7z_core::listing::ArchiveEntry;
use std::io::Write;

/// How entries are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// One path per line.
    Names,
    /// One path per entry, each followed by NUL.
    NullTerminated,
    /// Tab-separated columns and a total line.
    Long,
}

pub struct HumanFormatter {
    style: ListStyle,
    human_readable: bool,
    use_colors: bool,
}

impl HumanFormatter {
    pub fn new(style: ListStyle, human_readable: bool) -> Self {
        Self {
            style,
            human_readable,
            use_colors: console::colors_enabled(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: u64) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, c) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }

    fn size_column(&self, bytes: Option<u64>) -> String {
        match bytes {
            Some(n) if self.human_readable => Self::format_size(n),
            Some(n) => n.to_string(),
            None => "-".to_string(),
        }
    }

    fn long_line(&self, entry: &ArchiveEntry) -> String {
        let modified = entry
            .modified
            .map_or_else(|| "-".to_string(), |m| m.to_string());
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            entry.kind,
            entry.attributes,
            modified,
            self.size_column(entry.size),
            self.size_column(entry.compressed_size),
            entry.path
        )
    }

    fn total_line(&self, listing: &ArchiveListing) -> String {
        let bytes = listing.summary.size.unwrap_or_else(|| listing.total_size());
        let size = if self.human_readable {
            Self::format_size(bytes)
        } else {
            Self::format_number(bytes)
        };
        let label = if self.use_colors {
            style("Total:").bold().to_string()
        } else {
            "Total:".to_string()
        };
        format!(
            "{label} {} files, {} folders, {size}",
            Self::format_number(listing.summary.files),
            Self::format_number(listing.summary.folders),
        )
    }

    /// Writes the listing to `out` in the configured style.
    pub fn render<W: Write>(&self, listing: &ArchiveListing, out: &mut W) -> std::io::Result<()> {
        match self.style {
            ListStyle::Names => {
                for entry in &listing.entries {
                    writeln!(out, "{}", entry.path)?;
                }
            }
            ListStyle::NullTerminated => {
                for entry in &listing.entries {
                    write!(out, "{}\0", entry.path)?;
                }
            }
            ListStyle::Long => {
                for entry in &listing.entries {
                    writeln!(out, "{}", self.long_line(entry))?;
                }
                writeln!(out)?;
                writeln!(out, "{}", self.total_line(listing))?;
            }
        }
        Ok(())
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_listing(&self, listing: &ArchiveListing) -> Result<()> {
        let mut term = Term::buffered_stdout();
        self.render(listing, &mut term)?;
        term.flush()?;
        Ok(())
    }
}
