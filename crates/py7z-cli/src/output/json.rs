//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use py7z_core::ArchiveListing;
use py7z_core::listing::ArchiveEntry;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub struct JsonFormatter;

#[derive(Serialize)]
struct PropertyOutput<'a> {
    key: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
struct EntryOutput<'a> {
    path: &'a str,
    kind: &'static str,
    attributes: String,
    size: Option<u64>,
    compressed_size: Option<u64>,
    modified: Option<String>,
}

impl<'a> From<&'a ArchiveEntry> for EntryOutput<'a> {
    fn from(entry: &'a ArchiveEntry) -> Self {
        Self {
            path: &entry.path,
            kind: entry.kind.as_str(),
            attributes: entry.attributes.to_string(),
            size: entry.size,
            compressed_size: entry.compressed_size,
            modified: entry
                .modified
                .map(|m| m.format(TIMESTAMP_FORMAT).to_string()),
        }
    }
}

#[derive(Serialize)]
struct SummaryOutput {
    files: u64,
    folders: u64,
    size: Option<u64>,
    compressed_size: Option<u64>,
}

#[derive(Serialize)]
struct ListingOutput<'a> {
    archive_type: Option<&'a str>,
    properties: Vec<PropertyOutput<'a>>,
    entries: Vec<EntryOutput<'a>>,
    summary: SummaryOutput,
}

impl<'a> From<&'a ArchiveListing> for ListingOutput<'a> {
    fn from(listing: &'a ArchiveListing) -> Self {
        Self {
            archive_type: listing.archive_type(),
            properties: listing
                .properties
                .iter()
                .map(|(key, value)| PropertyOutput { key, value })
                .collect(),
            entries: listing.entries.iter().map(EntryOutput::from).collect(),
            summary: SummaryOutput {
                files: listing.summary.files,
                folders: listing.summary.folders,
                size: listing.summary.size,
                compressed_size: listing.summary.compressed_size,
            },
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_listing(&self, listing: &ArchiveListing) -> Result<()> {
        Self::output(&JsonOutput::success("list", ListingOutput::from(listing)))
    }

    fn format_failure(&self, operation: &str, error: &anyhow::Error) -> Result<()> {
        Self::output(&JsonOutput::error(operation, format!("{error:#}")))
    }
}
