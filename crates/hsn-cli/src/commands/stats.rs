//! Stats command - summarize the reference table.

use std::path::Path;

use colored::Colorize;
use hsn::{AgentConfig, CodeLevel};

pub fn run(
    data: &Path,
    config: AgentConfig,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let agent = super::load_agent(data, config)?;
    let store = agent.store();
    let stats = store.stats();

    if json_output {
        let output = serde_json::json!({
            "stats": stats,
            "source": store.source(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Reference table".cyan().bold(),
        data.display().to_string().white()
    );
    println!();

    println!("  Total codes: {}", stats.total_codes.to_string().white().bold());
    for level in CodeLevel::ALL {
        println!(
            "  {:<12} {}",
            format!("{}:", level.label()),
            stats.count(level).to_string().white()
        );
    }
    if stats.empty_descriptions > 0 {
        println!(
            "  {} {} code(s) without a description",
            "Warning:".yellow(),
            stats.empty_descriptions
        );
    }

    if let Some(source) = store.source() {
        println!();
        println!("{}", "Source:".yellow().bold());
        println!("  Format: {}", source.format);
        println!("  Rows:   {}", source.row_count);
        println!("  Size:   {} bytes", source.size_bytes);
        println!("  Hash:   {}", source.hash);
    }

    Ok(())
}
