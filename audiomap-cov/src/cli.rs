//! Command-line interface definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Read-only audio catalog inspection and prompt coverage review.
#[derive(Debug, Parser)]
#[command(name = "audiomap-cov", version, about)]
pub struct Cli {
    /// Catalog CSV path (falls back to AUDIOMAP_CATALOG)
    #[arg(long, env = "AUDIOMAP_CATALOG")]
    pub catalog: PathBuf,

    /// Engine configuration TOML; built-in defaults when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Company tier to search before the global tier
    #[arg(long)]
    pub company: Option<String>,

    /// Schema context, accepted for compatibility with diagram tooling
    #[arg(long)]
    pub schema: Option<String>,

    /// Emit JSON instead of human-readable output
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve one or more prompts to playable ids
    Resolve {
        /// Prompt text; each argument is resolved separately
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Batch coverage report over a prompts file, one prompt per line
    Coverage {
        #[arg(long)]
        prompts: PathBuf,
    },
    /// Catalog size statistics
    Stats,
    /// Catalog integrity report
    Validate,
    /// Search transcripts by fragment
    Search {
        fragment: String,
        /// Match the transcript start instead of any substring
        #[arg(long)]
        prefix: bool,
        /// Restrict to one folder
        #[arg(long)]
        folder: Option<String>,
    },
}
