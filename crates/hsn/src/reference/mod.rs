//! Reference table loading and lookup.
//!
//! The reference table maps HSN codes to their descriptions. It is loaded
//! once from a delimited file (code, description) and then only read.
//!
//! # Example
//!
//! ```ignore
//! use hsn::reference::ReferenceStore;
//!
//! let store = ReferenceStore::load("data/hsn_codes.csv")?;
//!
//! if let Some(entry) = store.lookup("0101") {
//!     println!("{}: {}", entry.code, entry.description);
//! }
//!
//! // Walk up the hierarchy of an unknown code
//! let parent = store.nearest_ancestor("01019999");
//! ```

mod loader;
mod source;
mod store;

pub use loader::{DuplicatePolicy, Loader, LoaderConfig};
pub use source::{CodeEntry, ReferenceStats, SourceMetadata};
pub use store::{ReferenceStore, ReferenceTable};
