//! In-memory HSN reference table.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

use tracing::warn;

use super::loader::{DuplicatePolicy, Loader};
use super::source::{CodeEntry, ReferenceStats, SourceMetadata};
use crate::code::{CodeLevel, is_well_formed, parent_prefixes};
use crate::error::{HsnError, Result};

/// Code → entry mapping.
pub type ReferenceTable = HashMap<String, CodeEntry>;

/// Read-only reference table of HSN codes.
///
/// Built once and never mutated, so it can be shared behind an `Arc`
/// between any number of validators, suggesters and threads.
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    table: ReferenceTable,
    stats: ReferenceStats,
    source: Option<SourceMetadata>,
}

impl ReferenceStore {
    /// Load a reference file with the default loader configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Loader::new().load_file(path)
    }

    /// Build a store from entries, rejecting conflicting duplicates.
    pub fn from_entries(entries: impl IntoIterator<Item = CodeEntry>) -> Result<Self> {
        Self::build(entries, DuplicatePolicy::Reject, "in-memory".to_string())
    }

    /// Build a store from entries with an explicit duplicate policy.
    pub(crate) fn build(
        entries: impl IntoIterator<Item = CodeEntry>,
        policy: DuplicatePolicy,
        source: String,
    ) -> Result<Self> {
        let mut table = ReferenceTable::new();

        for (idx, entry) in entries.into_iter().enumerate() {
            if !is_well_formed(&entry.code) {
                return Err(HsnError::InvalidCode {
                    row: idx + 1,
                    code: entry.code,
                });
            }
            match table.entry(entry.code.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
                Entry::Occupied(mut slot) => {
                    if slot.get().description == entry.description {
                        continue;
                    }
                    match policy {
                        DuplicatePolicy::Reject => {
                            return Err(HsnError::DuplicateCode {
                                code: entry.code,
                                first: slot.get().description.clone(),
                                second: entry.description,
                            });
                        }
                        DuplicatePolicy::LastWins => {
                            warn!(code = %entry.code, "duplicate code, keeping later description");
                            slot.insert(entry);
                        }
                    }
                }
            }
        }

        let stats = compute_stats(&table, source);
        Ok(Self {
            table,
            stats,
            source: None,
        })
    }

    /// Attach source file metadata.
    pub(crate) fn with_source(mut self, source: SourceMetadata) -> Self {
        self.source = Some(source);
        self
    }

    /// Exact lookup of a code.
    pub fn lookup(&self, code: &str) -> Option<&CodeEntry> {
        self.table.get(code)
    }

    /// Check whether a code exists.
    pub fn contains(&self, code: &str) -> bool {
        self.table.contains_key(code)
    }

    /// Candidate prefixes, longest first, starting with the code itself
    /// (`010121` → `010121`, `0101`, `01`).
    ///
    /// Not filtered by existence; use [`Self::nearest_ancestor`] for that.
    /// Malformed codes yield no candidates.
    pub fn ancestors(&self, code: &str) -> Vec<String> {
        if !is_well_formed(code) {
            return Vec::new();
        }
        std::iter::once(code)
            .chain(parent_prefixes(code))
            .map(str::to_string)
            .collect()
    }

    /// The longest existing strict parent of `code`, skipping gaps in the table.
    pub fn nearest_ancestor(&self, code: &str) -> Option<&CodeEntry> {
        parent_prefixes(code)
            .into_iter()
            .find_map(|prefix| self.table.get(prefix))
    }

    /// All entries sorted by code.
    pub fn entries(&self) -> Vec<&CodeEntry> {
        let mut entries: Vec<&CodeEntry> = self.table.values().collect();
        entries.sort_by(|a, b| a.code.cmp(&b.code));
        entries
    }

    /// Direct children of `code` (the next level down), sorted by code.
    pub fn children(&self, code: &str) -> Vec<&CodeEntry> {
        let child_len = code.len() + 2;
        let mut children: Vec<&CodeEntry> = self
            .table
            .values()
            .filter(|e| e.code.len() == child_len && e.code.starts_with(code))
            .collect();
        children.sort_by(|a, b| a.code.cmp(&b.code));
        children
    }

    /// Number of codes.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table has no codes.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Get statistics about the loaded table.
    pub fn stats(&self) -> &ReferenceStats {
        &self.stats
    }

    /// Metadata for the file the table came from, if any.
    pub fn source(&self) -> Option<&SourceMetadata> {
        self.source.as_ref()
    }
}

fn compute_stats(table: &ReferenceTable, source: String) -> ReferenceStats {
    let mut stats = ReferenceStats {
        total_codes: table.len(),
        source,
        ..Default::default()
    };

    for entry in table.values() {
        match entry.level() {
            Some(CodeLevel::Chapter) => stats.chapters += 1,
            Some(CodeLevel::Heading) => stats.headings += 1,
            Some(CodeLevel::Subheading) => stats.subheadings += 1,
            Some(CodeLevel::TariffItem) => stats.tariff_items += 1,
            None => {}
        }
        if entry.description.trim().is_empty() {
            stats.empty_descriptions += 1;
        }
    }

    stats
}
