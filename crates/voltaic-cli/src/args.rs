//! Command-line argument definitions for the Voltaic CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the output format, and logging verbosity.

use clap::{Parser, ValueEnum};

/// What the CLI writes to the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// The rendered schematic.
    #[default]
    Svg,
    /// The computed placement as JSON.
    Layout,
}

/// Command-line arguments for the Voltaic schematic tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input netlist
    #[arg(help = "Path to the input netlist (JSON)")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Emit::Svg)]
    pub emit: Emit,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
