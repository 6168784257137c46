//! Suggest command - rank HSN codes for a product description.

use std::path::Path;

use colored::Colorize;
use hsn::{AgentConfig, QueryResponse};

pub fn run(
    data: &Path,
    config: AgentConfig,
    description: String,
    top_k: usize,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let agent = super::load_agent(data, config)?;
    let response = agent.suggest(&description, top_k);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let QueryResponse::Suggest(response) = response else {
        return Err("unexpected validation response".into());
    };

    if let Some(error) = &response.error {
        println!("{} {}", "Note:".yellow(), error);
        return Ok(());
    }
    if response.suggestions.is_empty() {
        println!("No HSN code suggestions found for the given query.");
        return Ok(());
    }

    println!(
        "{} {}",
        "Suggestions for".cyan().bold(),
        response.query.white()
    );
    println!();

    for (i, s) in response.suggestions.iter().enumerate() {
        let pct = s.confidence * 100.0;
        let confidence = format!("{:.1}%", pct);
        let confidence = if pct >= 80.0 {
            confidence.green()
        } else if pct >= 50.0 {
            confidence.yellow()
        } else {
            confidence.red()
        };
        println!(
            "  {}. {} ({})",
            i + 1,
            s.code.white().bold(),
            confidence
        );
        println!("     {}", s.description);
    }

    Ok(())
}
