//! Application state for the web server.

use std::sync::Arc;

use hsn::HsnAgent;

/// Shared application state.
///
/// The agent is read-only, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<HsnAgent>,
}

impl AppState {
    /// Create new application state.
    pub fn new(agent: HsnAgent) -> Self {
        Self {
            agent: Arc::new(agent),
        }
    }
}
