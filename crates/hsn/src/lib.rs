//! HSN: validation and suggestion of Harmonized System of Nomenclature codes.
//!
//! HSN codes classify traded goods in a hierarchy of 2-digit chapters,
//! 4-digit headings, 6-digit subheadings and 8-digit tariff items. This
//! crate checks codes against a reference table, falling back to the
//! nearest existing parent, and suggests codes for product descriptions.
//!
//! # Core Principles
//!
//! - **Load once**: the reference table is read at startup and never mutated
//! - **Per-item failures**: a bad code in a batch never fails the batch
//! - **Deterministic ranking**: identical queries give identical suggestions
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use hsn::{HsnAgent, QueryRequest, ReferenceStore};
//!
//! let store = Arc::new(ReferenceStore::load("data/hsn_codes.csv").unwrap());
//! let agent = HsnAgent::new(store);
//!
//! let response = agent.handle(&QueryRequest::validate("01, 0101, 999999"));
//! println!("{}", response.render_text());
//! ```

pub mod code;
pub mod error;
pub mod reference;
pub mod request;
pub mod suggestion;
pub mod validation;

mod agent;

pub use crate::agent::{AgentConfig, HsnAgent};
pub use code::{CodeLevel, FormatError};
pub use error::{HsnError, Result};
pub use reference::{
    CodeEntry, DuplicatePolicy, Loader, LoaderConfig, ReferenceStats, ReferenceStore,
    SourceMetadata,
};
pub use request::{Action, QueryRequest, QueryResponse, SuggestResponse, ValidationEntry};
pub use suggestion::{Suggester, SuggesterConfig, Suggestion};
pub use validation::{CodeError, ValidationResult, Validator};
