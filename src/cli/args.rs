//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Overlay community-registered website links onto administrative region maps
#[derive(Parser, Debug)]
#[command(name = "regionlink")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (default: XDG config location)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a website for a region
    Add {
        /// Region (city/regency) name
        region: String,
        /// Website URL (http:// or https://)
        website: String,
    },

    /// List registered websites in insertion order
    List,

    /// Show the entry a region label resolves to
    Resolve {
        /// Region label as found in the boundary dataset
        label: String,
    },

    /// Show the style a region label is drawn with
    Style {
        /// Region label as found in the boundary dataset
        label: String,
    },

    /// Render the overlay for a boundary dataset as JSON
    Render {
        /// GeoJSON FeatureCollection (default: boundary_file setting)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        boundary: Option<PathBuf>,
        /// Render features with this label (case-insensitive) in hover state
        #[arg(long)]
        hover: Option<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Show config file location
    Path,
    /// Print a commented config template
    Template,
}
