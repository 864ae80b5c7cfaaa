//! Command-line argument definitions for the Stacklens CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input and output, the frame offset,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Stacklens error report tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a stack trace or a JSON thrown value, `-` for stdin
    #[arg(help = "Path to the input file, or - to read stdin")]
    pub input: String,

    /// Path to the output JSON file, stdout when absent
    #[arg(short, long)]
    pub output: Option<String>,

    /// Number of leading frames to drop, overrides the configuration file
    #[arg(long)]
    pub offset: Option<usize>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Write the report on a single line
    #[arg(long)]
    pub compact: bool,
}
