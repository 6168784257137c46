//! Description-based HSN code suggestions.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::similarity::{keyword_overlap, normalize, sequence_ratio_chars, words};
use crate::error::{HsnError, Result};
use crate::reference::ReferenceStore;

/// Suggester configuration.
#[derive(Debug, Clone)]
pub struct SuggesterConfig {
    /// Number of suggestions returned by default.
    pub top_k: usize,
    /// Entries must score strictly above this to be suggested.
    pub min_score: f64,
    /// Weight of the character sequence ratio.
    pub sequence_weight: f64,
    /// Weight of the keyword overlap.
    pub keyword_weight: f64,
}

impl Default for SuggesterConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            min_score: 0.0,
            sequence_weight: 0.7,
            keyword_weight: 0.3,
        }
    }
}

impl SuggesterConfig {
    /// Check that weights are non-negative and sum to one.
    pub fn validate(&self) -> Result<()> {
        if self.sequence_weight < 0.0 || self.keyword_weight < 0.0 {
            return Err(HsnError::Config(
                "similarity weights must be non-negative".to_string(),
            ));
        }
        if ((self.sequence_weight + self.keyword_weight) - 1.0).abs() > 1e-9 {
            return Err(HsnError::Config(format!(
                "similarity weights must sum to 1.0 (got {} + {})",
                self.sequence_weight, self.keyword_weight
            )));
        }
        if !(0.0..1.0).contains(&self.min_score) {
            return Err(HsnError::Config(format!(
                "min_score must be in [0, 1) (got {})",
                self.min_score
            )));
        }
        Ok(())
    }
}

/// A suggested code for a description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The suggested HSN code.
    pub code: String,
    /// Description of the code.
    pub description: String,
    /// Similarity between the query and the description (0.0-1.0).
    pub confidence: f64,
}

/// A reference entry prepared for scoring.
#[derive(Debug, Clone)]
struct IndexedEntry {
    code: String,
    description: String,
    normalized: String,
    chars: Vec<char>,
    words: HashSet<String>,
}

/// Ranks reference entries by similarity to a free-text description.
///
/// Every entry with a description is scored on each query. Descriptions are
/// normalized once, when the suggester is built.
#[derive(Debug, Clone)]
pub struct Suggester {
    store: Arc<ReferenceStore>,
    index: Vec<IndexedEntry>,
    config: SuggesterConfig,
}

impl Suggester {
    /// Create a suggester with default configuration.
    pub fn new(store: Arc<ReferenceStore>) -> Self {
        Self::build(store, SuggesterConfig::default())
    }

    /// Create a suggester with custom configuration.
    pub fn with_config(store: Arc<ReferenceStore>, config: SuggesterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(store, config))
    }

    fn build(store: Arc<ReferenceStore>, config: SuggesterConfig) -> Self {
        let index = store
            .entries()
            .into_iter()
            .filter(|entry| !entry.description.trim().is_empty())
            .map(|entry| {
                let normalized = normalize(&entry.description);
                IndexedEntry {
                    code: entry.code.clone(),
                    description: entry.description.clone(),
                    chars: normalized.chars().collect(),
                    words: words(&normalized),
                    normalized,
                }
            })
            .collect();

        Self {
            store,
            index,
            config,
        }
    }

    /// Suggest up to the configured default number of codes.
    pub fn suggest_default(&self, description: &str) -> Vec<Suggestion> {
        self.suggest(description, self.config.top_k)
    }

    /// Suggest up to `top_k` codes for a description, best first.
    ///
    /// Ties are broken by shorter code, then by code order, so the output
    /// is stable for a given table.
    pub fn suggest(&self, description: &str, top_k: usize) -> Vec<Suggestion> {
        let query = normalize(description);
        if query.is_empty() || top_k == 0 {
            return Vec::new();
        }

        let query_chars: Vec<char> = query.chars().collect();
        let query_words = words(&query);

        let mut scored: Vec<(&IndexedEntry, f64)> = self
            .index
            .iter()
            .map(|entry| (entry, self.score(&query, &query_chars, &query_words, entry)))
            .filter(|(_, score)| *score > self.config.min_score)
            .collect();

        scored.sort_by(|(a, sa), (b, sb)| rank(a, *sa, b, *sb));
        scored.truncate(top_k);

        debug!(query = %query, returned = scored.len(), "suggested HSN codes");

        scored
            .into_iter()
            .map(|(entry, score)| Suggestion {
                code: entry.code.clone(),
                description: entry.description.clone(),
                confidence: score,
            })
            .collect()
    }

    fn score(
        &self,
        query: &str,
        query_chars: &[char],
        query_words: &HashSet<String>,
        entry: &IndexedEntry,
    ) -> f64 {
        if query == entry.normalized {
            return 1.0;
        }
        let ratio = sequence_ratio_chars(query_chars, &entry.chars);
        let overlap = keyword_overlap(query_words, &entry.words);
        (self.config.sequence_weight * ratio + self.config.keyword_weight * overlap).clamp(0.0, 1.0)
    }

    /// The reference store this suggester reads.
    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    /// The active configuration.
    pub fn config(&self) -> &SuggesterConfig {
        &self.config
    }
}

/// Descending score, then shorter code, then code order.
fn rank(a: &IndexedEntry, score_a: f64, b: &IndexedEntry, score_b: f64) -> Ordering {
    score_b
        .total_cmp(&score_a)
        .then_with(|| a.code.len().cmp(&b.code.len()))
        .then_with(|| a.code.cmp(&b.code))
}
