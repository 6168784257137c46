//! Serve command - run the HTTP query API.

use std::path::Path;

use colored::Colorize;
use hsn::AgentConfig;

use crate::server::{app, state::AppState};

pub fn run(
    data: &Path,
    config: AgentConfig,
    host: String,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let agent = super::load_agent(data, config)?;
    let codes = agent.store().len();
    let state = AppState::new(agent);

    let url = format!("http://{}:{}", host, port);
    println!();
    println!(
        "{} {}",
        "Starting HSN server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Data:  {} ({} codes)", data.display(), codes);
    println!("  Query: POST {}/api/query", url);
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, &host, port))
}
