//! Reference table loader with delimiter detection.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use super::source::{CodeEntry, SourceMetadata};
use super::store::ReferenceStore;
use crate::code::{check_format, is_well_formed};
use crate::error::{HsnError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Non-blank lines sampled when detecting the delimiter.
const SAMPLE_LINES: usize = 10;

/// Header names accepted for the code column.
const CODE_HEADERS: &[&str] = &["code", "hsn", "hsn_code", "hsncode", "hsn code"];

/// Header names accepted for the description column.
const DESCRIPTION_HEADERS: &[&str] = &["description", "desc", "hsn_description"];

/// What to do when a code appears twice with different descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail the load.
    #[default]
    Reject,
    /// Keep the description from the later row.
    LastWins,
}

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Quote character.
    pub quote: u8,
    /// Handling of conflicting duplicate codes.
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            quote: b'"',
            duplicate_policy: DuplicatePolicy::Reject,
        }
    }
}

/// Loads two-column (code, description) reference files.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a new loader with default configuration.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a reference file into a store.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<ReferenceStore> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| HsnError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| HsnError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let (entries, row_count) = self.parse_bytes(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format,
            row_count,
        );

        let store = ReferenceStore::build(
            entries,
            self.config.duplicate_policy,
            format!("file: {}", path.display()),
        )?
        .with_source(source);

        info!(
            path = %path.display(),
            codes = store.len(),
            rows = row_count,
            "loaded HSN reference table"
        );

        Ok(store)
    }

    /// Load a reference table from in-memory bytes.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<ReferenceStore> {
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };
        let (entries, _) = self.parse_bytes(bytes, delimiter)?;
        ReferenceStore::build(entries, self.config.duplicate_policy, "in-memory".to_string())
    }

    /// Parse rows into entries. Returns the entries and the data row count.
    fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<(Vec<CodeEntry>, usize)> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut entries = Vec::new();
        let mut row_count = 0;

        let (code_col, desc_col) = if self.config.has_header {
            let header = reader.headers()?.clone();
            if header_is_data(&header) {
                warn!(
                    first = header.get(0).unwrap_or(""),
                    "first line holds a code, reading it as data"
                );
                row_count += 1;
                if let Some(entry) = parse_record(&header, 1, 0, 1)? {
                    entries.push(entry);
                }
                (0, 1)
            } else {
                let names: Vec<String> = header.iter().map(clean_header).collect();
                resolve_columns(&names)
            }
        } else {
            (0, 1)
        };
        debug!(code_col, desc_col, delimiter = %(delimiter as char).escape_default(), "resolved reference columns");

        // Fallback when the reader reports no position.
        let first_row = if self.config.has_header { 2 } else { 1 };

        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            // csv skips blank lines, so take the line number from the reader.
            let row = record
                .position()
                .map_or(row_idx + first_row, |p| p.line() as usize);
            row_count += 1;

            if let Some(entry) = parse_record(&record, row, code_col, desc_col)? {
                entries.push(entry);
            }
        }

        if entries.is_empty() {
            return Err(HsnError::EmptyData("No data rows found".to_string()));
        }

        Ok((entries, row_count))
    }
}

/// Turn one record into an entry. Rows with an empty code cell yield `None`.
fn parse_record(
    record: &StringRecord,
    row: usize,
    code_col: usize,
    desc_col: usize,
) -> Result<Option<CodeEntry>> {
    let Some(raw_code) = record.get(code_col) else {
        return Err(HsnError::Parse {
            row,
            message: format!("missing code column (found {} fields)", record.len()),
        });
    };

    let code = raw_code.trim_start_matches('\u{feff}').trim().trim_matches('"').trim();
    if code.is_empty() {
        return Ok(None);
    }

    let Some(description) = record.get(desc_col) else {
        return Err(HsnError::Parse {
            row,
            message: format!(
                "expected code and description columns, found {} field(s)",
                record.len()
            ),
        });
    };

    if check_format(code).is_err() {
        return Err(HsnError::InvalidCode {
            row,
            code: code.to_string(),
        });
    }

    Ok(Some(CodeEntry::new(code, description.trim())))
}

/// Lowercase a header cell and strip a byte-order mark.
fn clean_header(cell: &str) -> String {
    cell.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// A header row whose first cell is already a well-formed code is data.
fn header_is_data(header: &StringRecord) -> bool {
    header
        .get(0)
        .map(|cell| cell.trim_start_matches('\u{feff}').trim().trim_matches('"').trim())
        .is_some_and(is_well_formed)
}

/// Pick the code and description columns from lowercase header names.
fn resolve_columns(headers: &[String]) -> (usize, usize) {
    let code_col = headers
        .iter()
        .position(|h| CODE_HEADERS.contains(&h.as_str()))
        .unwrap_or(0);
    let desc_col = headers
        .iter()
        .position(|h| DESCRIPTION_HEADERS.contains(&h.as_str()))
        .unwrap_or(if code_col == 1 { 0 } else { 1 });
    (code_col, desc_col)
}

/// Detect the delimiter from the first non-blank lines.
///
/// Every line of a reference file has at least two columns, so a candidate
/// must occur on each sampled line. The candidate whose per-line count
/// varies least wins; ties go to the earlier entry of [`DELIMITERS`].
/// Falls back to comma when no candidate occurs on every line.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let text = String::from_utf8_lossy(bytes);
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();

    if lines.is_empty() {
        return Err(HsnError::EmptyData("No lines to analyze".to_string()));
    }

    let best = DELIMITERS
        .iter()
        .filter_map(|&delim| {
            let counts: Vec<usize> = lines
                .iter()
                .map(|line| count_delimiter_in_line(line, delim))
                .collect();
            let min = counts.iter().copied().min()?;
            let max = counts.iter().copied().max()?;
            (min > 0).then_some((delim, max - min))
        })
        .min_by_key(|&(_, spread)| spread)
        .map(|(delim, _)| delim);

    Ok(best.unwrap_or(b','))
}

/// Count unquoted occurrences of `delimiter` in a line.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    line.bytes()
        .filter(|&b| {
            if b == b'"' {
                in_quotes = !in_quotes;
            }
            b == delimiter && !in_quotes
        })
        .count()
}
