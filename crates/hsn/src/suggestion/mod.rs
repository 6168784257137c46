//! HSN code suggestions for free-text descriptions.
//!
//! Candidates are ranked by a weighted mix of character-sequence similarity
//! and keyword overlap between the query and each reference description.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use hsn::{ReferenceStore, Suggester};
//!
//! let store = Arc::new(ReferenceStore::load("data/hsn_codes.csv")?);
//! let suggester = Suggester::new(store);
//!
//! for s in suggester.suggest("live horses for breeding", 5) {
//!     println!("{} {:.3} {}", s.code, s.confidence, s.description);
//! }
//! ```

pub mod similarity;
mod suggester;

pub use suggester::{Suggester, SuggesterConfig, Suggestion};
