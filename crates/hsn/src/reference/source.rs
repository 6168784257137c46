//! Reference source metadata and table entries.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::code::CodeLevel;

/// A single row of the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    /// The HSN code (2, 4, 6 or 8 digits).
    pub code: String,
    /// Official description of the code.
    pub description: String,
}

impl CodeEntry {
    /// Create a new entry.
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }

    /// Hierarchy level of this entry.
    pub fn level(&self) -> Option<CodeLevel> {
        CodeLevel::from_digits(self.code.len())
    }
}

/// Metadata about the file a reference table was loaded from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows read (excluding header).
    pub row_count: usize,
    /// When the table was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            loaded_at: Utc::now(),
        }
    }
}

/// Statistics about a loaded reference table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceStats {
    /// Total number of codes.
    pub total_codes: usize,
    /// 2-digit chapters.
    pub chapters: usize,
    /// 4-digit headings.
    pub headings: usize,
    /// 6-digit subheadings.
    pub subheadings: usize,
    /// 8-digit tariff items.
    pub tariff_items: usize,
    /// Codes with an empty description.
    pub empty_descriptions: usize,
    /// Data source description.
    pub source: String,
}

impl ReferenceStats {
    /// Count for a single level.
    pub fn count(&self, level: CodeLevel) -> usize {
        match level {
            CodeLevel::Chapter => self.chapters,
            CodeLevel::Heading => self.headings,
            CodeLevel::Subheading => self.subheadings,
            CodeLevel::TariffItem => self.tariff_items,
        }
    }
}
