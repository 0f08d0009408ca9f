//! CLI argument definitions using clap
//!
//! Commands:
//! - campusd serve --config <path> [--seed]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// campusd - student records and portal API
#[derive(Parser, Debug)]
#[command(name = "campusd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the campusd HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./campusd.json")]
        config: PathBuf,

        /// Load the sample roster into the store before serving
        #[arg(long)]
        seed: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
