//! CLI command implementations.

pub mod ask;
pub mod serve;
pub mod stats;
pub mod suggest;
pub mod validate;

use std::path::Path;

use hsn::{AgentConfig, HsnAgent};

/// Load the reference table and build an agent over it.
pub fn load_agent(data: &Path, config: AgentConfig) -> Result<HsnAgent, Box<dyn std::error::Error>> {
    if !data.exists() {
        return Err(format!(
            "Reference file not found: {}\nPass --data <FILE> or set HSN_DATA.",
            data.display()
        )
        .into());
    }
    Ok(HsnAgent::from_path(data, config)?)
}
