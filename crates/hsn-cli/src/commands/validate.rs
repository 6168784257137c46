//! Validate command - check HSN codes against the reference table.

use std::path::Path;

use colored::Colorize;
use hsn::{AgentConfig, QueryRequest};

pub fn run(
    data: &Path,
    config: AgentConfig,
    codes: String,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let agent = super::load_agent(data, config)?;

    if json_output {
        let response = agent.handle(&QueryRequest::validate(codes));
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let results = agent.validator().validate(&codes);
    if results.is_empty() {
        println!("{}", "No codes to validate.".yellow());
        return Ok(());
    }

    println!("{}", "HSN code validation".cyan().bold());
    println!();

    for result in &results {
        if result.valid {
            println!(
                "  {} {}  {}",
                "✓".green(),
                result.input_code.white().bold(),
                result.description.as_deref().unwrap_or("")
            );
            continue;
        }

        println!(
            "  {} {}  {}",
            "✗".red(),
            result.input_code.white().bold(),
            result.error.as_deref().unwrap_or("").red()
        );
        if let Some(nearest) = &result.nearest {
            println!(
                "      Nearest: {}  {}",
                nearest.cyan(),
                result.description.as_deref().unwrap_or("")
            );
        }
    }

    let valid = results.iter().filter(|r| r.valid).count();
    println!();
    println!(
        "{} of {} code(s) valid",
        valid.to_string().green().bold(),
        results.len()
    );

    Ok(())
}
