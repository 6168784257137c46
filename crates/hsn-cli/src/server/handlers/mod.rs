//! API request handlers.

mod query;

pub use query::*;
