//! Ask command - interpret a free-text message.

use std::path::Path;

use colored::Colorize;
use hsn::AgentConfig;

pub fn run(
    data: &Path,
    config: AgentConfig,
    message: Vec<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let agent = super::load_agent(data, config)?;
    let (request, response) = agent.handle_message(&message.join(" "));

    if json_output {
        let output = serde_json::json!({
            "request": request,
            "response": response,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    eprintln!(
        "{} {} {}",
        "Interpreted as".dimmed(),
        request.action.to_string().cyan(),
        request.query.white()
    );
    println!("{}", response.render_text().trim_end());

    Ok(())
}
