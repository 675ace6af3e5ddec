//! Command-line interface definitions for regen.

use clap::Parser;
use regen_core::{CapturePolicy, GeneratorConfig};
use std::path::PathBuf;

/// regen - generate random strings that match a regular expression
#[derive(Parser, Debug)]
#[command(name = "regen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Regular expression to generate from
    pub pattern: String,

    /// Number of strings to print, one per line
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Seed for the random source (overrides config)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Path to regen.toml configuration file
    #[arg(short, long, env = "REGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Repetition count used for unbounded quantifiers (overrides config)
    #[arg(long)]
    pub repeat_cap: Option<u32>,

    /// Keep captured groups between generated strings
    #[arg(long)]
    pub persist_captures: bool,

    /// Match letters case-insensitively
    #[arg(short = 'i', long)]
    pub case_insensitive: bool,

    /// Let `.` also produce newlines
    #[arg(long)]
    pub dot_all: bool,

    /// Enable verbose output (-v, -vv, -vvv for increasing verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Applies command-line overrides on top of file configuration.
    pub fn apply(&self, mut config: GeneratorConfig) -> GeneratorConfig {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(cap) = self.repeat_cap {
            config.repeat_cap = cap;
        }
        if self.persist_captures {
            config.capture_policy = CapturePolicy::Persist;
        }
        config.case_insensitive |= self.case_insensitive;
        config.dot_matches_new_line |= self.dot_all;
        config
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
