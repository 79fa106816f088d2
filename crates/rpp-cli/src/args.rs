//! Command-line argument definitions for the RPP CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the project file, the configuration file,
//! logging verbosity, and the inspection [`Command`] to run.

use clap::{Parser, Subcommand};

/// Command-line arguments for the RPP project inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input project file
    #[arg(help = "Path to the input .rpp file")]
    pub input: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// What to print.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print every node matching a tag chain, e.g. `query TRACK ITEM`
    Query {
        /// Tag chain; each tag after the first must be a direct child
        #[arg(required = true)]
        tags: Vec<String>,

        /// Only search inside the track with this name
        #[arg(short, long)]
        track: Option<String>,
    },

    /// List the media items of a track
    Items {
        /// Track name
        track: String,
    },

    /// List markers and region bounds
    Markers,

    /// Print the node tree
    Tree {
        /// Maximum depth to print; the root is depth 0
        #[arg(short, long)]
        depth: Option<usize>,
    },
}
