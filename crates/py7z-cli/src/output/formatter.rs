//! Output formatter trait for CLI results.

use anyhow::Result;
use py7z_core::ArchiveListing;
use serde::Serialize;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format a parsed archive listing
    fn format_listing(&self, listing: &ArchiveListing) -> Result<()>;

    /// Report a failed operation on standard output.
    ///
    /// Errors always reach standard error through `main`; this only exists
    /// for consumers that parse standard output.
    fn format_failure(&self, _operation: &str, _error: &anyhow::Error) -> Result<()> {
        Ok(())
    }
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
