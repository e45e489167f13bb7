//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// NYTimes Books source connector
#[derive(Parser, Debug)]
#[command(name = "source-nytimes-books")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Outputs the json configuration specification
    Spec,

    /// Checks the config used to connect
    Check {
        /// Path to the json configuration file
        #[arg(long)]
        config: PathBuf,
    },

    /// Outputs a catalog describing the source's schema
    Discover {
        /// Path to the json configuration file
        #[arg(long)]
        config: PathBuf,
    },

    /// Reads the source and outputs messages to STDOUT
    Read {
        /// Path to the json configuration file
        #[arg(long)]
        config: PathBuf,

        /// Path to the catalog used to determine which data to read
        #[arg(long)]
        catalog: PathBuf,

        /// Path to the json-encoded state file (accepted, not used)
        #[arg(long)]
        state: Option<PathBuf>,
    },
}

impl Commands {
    /// Protocol name of the command
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Spec => "spec",
            Commands::Check { .. } => "check",
            Commands::Discover { .. } => "discover",
            Commands::Read { .. } => "read",
        }
    }
}
