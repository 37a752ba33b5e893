//! Command line argument parsing for the termflow CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// termflow - automatic indexing of natural-language text
#[derive(Parser, Debug, Clone)]
#[command(name = "termflow")]
#[command(about = "Turns raw text into a stream of index terms")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TermflowArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TermflowArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the indexing pipeline over a text file
    Index(IndexArgs),

    /// Print Porter stems of words
    Stem(StemArgs),

    /// Print the tokens of every line of a text file
    Tokenize(TokenizeArgs),
}

/// Arguments for indexing a file
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    /// Input text file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG", env = "TERMFLOW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Treat blank-line separated paragraphs as records
    #[arg(long)]
    pub records: bool,

    /// Print stage counters after the items
    #[arg(long)]
    pub report: bool,
}

/// Arguments for stemming words
#[derive(Parser, Debug, Clone)]
pub struct StemArgs {
    /// Words to stem
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,

    /// Configuration file providing the stemmer rule table (JSON)
    #[arg(short, long, value_name = "CONFIG", env = "TERMFLOW_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for tokenizing a file
#[derive(Parser, Debug, Clone)]
pub struct TokenizeArgs {
    /// Input text file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Configuration file providing the tokenizer rules (JSON)
    #[arg(short, long, value_name = "CONFIG", env = "TERMFLOW_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
