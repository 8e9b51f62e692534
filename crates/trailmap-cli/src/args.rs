//! Command-line argument definitions for the Trailmap CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, scene overrides and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Trailmap renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the roadmap document (TOML)
    #[arg(help = "Path to the input roadmap document")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Theme id, overriding the document's theme
    #[arg(long)]
    pub theme: Option<String>,

    /// Container width in pixels, overriding the document's width
    #[arg(long)]
    pub width: Option<f32>,

    /// Number of 60 Hz frames to simulate before taking the snapshot
    #[arg(long, default_value_t = 60)]
    pub frames: u32,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
