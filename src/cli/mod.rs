//! CLI argument parsing for casematch
//!
//! Uses clap for argument parsing.
//! Supports global flags: --format, --config, --quiet, --verbose, --log-level, --log-json

pub mod parse;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use casematch_core::format::OutputFormat;
use parse::{parse_format, parse_threshold};

/// casematch - find repeated cases among free-text records
#[derive(Parser, Debug)]
#[command(name = "casematch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human, json, or records
    #[arg(long, global = true, default_value = "human", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Config file (defaults to ./casematch.toml, then the global config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. `debug`, `casematch_core=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank records by similarity to one query record
    Similar {
        /// JSON file of records (`-` reads stdin)
        #[arg(long, short)]
        input: PathBuf,

        /// ID of the query record
        #[arg(long)]
        query: String,

        /// Keep records scoring strictly above this value (0.0 to 1.0)
        #[arg(long, short, value_parser = parse_threshold)]
        threshold: Option<f64>,

        /// Maximum number of results
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Find near-duplicate pairs among all records
    Duplicates {
        /// JSON file of records (`-` reads stdin)
        #[arg(long, short)]
        input: PathBuf,

        /// Keep pairs scoring strictly above this value (0.0 to 1.0)
        #[arg(long, short, value_parser = parse_threshold)]
        threshold: Option<f64>,
    },

    /// Show the normalized tokens of a text
    Tokens {
        /// Text to normalize
        text: String,
    },
}

impl Commands {
    /// Whether the command's behavior depends on `casematch.toml`
    pub fn reads_config(&self) -> bool {
        !matches!(self, Commands::Tokens { .. })
    }
}
