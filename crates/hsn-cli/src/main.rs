//! HSN CLI - validate and suggest Harmonized System codes.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.agent_config();

    let result = match cli.command {
        Commands::Validate { codes, json } => commands::validate::run(&cli.data, config, codes, json),

        Commands::Suggest {
            description,
            top_k,
            json,
        } => commands::suggest::run(&cli.data, config, description, top_k, json),

        Commands::Ask { message, json } => commands::ask::run(&cli.data, config, message, json),

        Commands::Stats { json } => commands::stats::run(&cli.data, config, json),

        Commands::Serve { host, port } => commands::serve::run(&cli.data, config, host, port),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
