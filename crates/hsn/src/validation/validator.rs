//! Hierarchical HSN code validation.

use std::sync::Arc;

use tracing::debug;

use super::result::{CodeError, ValidationResult};
use crate::code::check_format;
use crate::reference::ReferenceStore;

/// Validates HSN codes against a reference table.
///
/// Unknown codes fall back to their nearest existing ancestor, so `01019999`
/// reports heading `0101` when only the heading is in the table.
#[derive(Debug, Clone)]
pub struct Validator {
    store: Arc<ReferenceStore>,
}

impl Validator {
    /// Create a validator over a shared reference store.
    pub fn new(store: Arc<ReferenceStore>) -> Self {
        Self { store }
    }

    /// Validate a comma-separated list of codes.
    ///
    /// Empty pieces are skipped. Every other piece yields exactly one
    /// result, in input order, including repeated codes.
    pub fn validate(&self, raw_query: &str) -> Vec<ValidationResult> {
        let results: Vec<ValidationResult> = split_codes(raw_query)
            .map(|code| self.validate_code(code))
            .collect();

        debug!(
            tokens = results.len(),
            valid = results.iter().filter(|r| r.valid).count(),
            "validated HSN codes"
        );

        results
    }

    /// Validate a single code token.
    pub fn validate_code(&self, code: &str) -> ValidationResult {
        let code = code.trim();

        if let Err(format_error) = check_format(code) {
            return ValidationResult::failed(code, &CodeError::from(format_error));
        }

        if let Some(entry) = self.store.lookup(code) {
            return ValidationResult::found(code, entry.description.clone());
        }

        match self.store.nearest_ancestor(code) {
            Some(parent) => {
                let error = CodeError::ParentOnly {
                    parent: parent.code.clone(),
                };
                ValidationResult::failed(code, &error)
                    .with_nearest(parent.code.clone(), parent.description.clone())
            }
            None => ValidationResult::failed(code, &CodeError::NotFound),
        }
    }

    /// The reference store this validator reads.
    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }
}

/// Split a raw query on commas, dropping pieces that are empty after trimming.
pub fn split_codes(raw_query: &str) -> impl Iterator<Item = &str> {
    raw_query
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
}
