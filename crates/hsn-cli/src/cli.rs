//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use hsn::{AgentConfig, DuplicatePolicy, LoaderConfig};
use std::path::PathBuf;

/// HSN: validate Harmonized System codes and suggest codes for products
#[derive(Parser)]
#[command(name = "hsn")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the HSN reference file (CSV/TSV with code and description columns)
    #[arg(
        long,
        global = true,
        env = "HSN_DATA",
        default_value = "data/hsn_codes.csv",
        value_name = "FILE"
    )]
    pub data: PathBuf,

    /// Field delimiter of the reference file (default: auto-detect)
    #[arg(long, global = true, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Keep the later description when a code appears twice
    #[arg(long, global = true)]
    pub last_wins: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate comma-separated HSN codes
    Validate {
        /// Codes to check, e.g. "01, 0101, 999999"
        #[arg(value_name = "CODES")]
        codes: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Suggest HSN codes for a product description
    Suggest {
        /// Product description
        #[arg(value_name = "DESCRIPTION")]
        description: String,

        /// Number of suggestions
        #[arg(short = 'k', long, default_value = "5")]
        top_k: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Answer a free-text message ("action: suggest query: ...", "is 0101 valid?")
    Ask {
        /// Message text
        #[arg(value_name = "MESSAGE", required = true, num_args = 1..)]
        message: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show reference table statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the query API over HTTP
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for web server
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },
}

impl Cli {
    /// Agent configuration from the global flags.
    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            loader: LoaderConfig {
                delimiter: self.delimiter,
                duplicate_policy: if self.last_wins {
                    DuplicatePolicy::LastWins
                } else {
                    DuplicatePolicy::Reject
                },
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Parse a delimiter given as a single ASCII character or by name.
fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.to_lowercase().as_str() {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        "comma" => Ok(b','),
        "semicolon" => Ok(b';'),
        "pipe" => Ok(b'|'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!(
            "Unknown delimiter: {}. Use a single character, tab, comma, semicolon, or pipe.",
            s
        )),
    }
}
