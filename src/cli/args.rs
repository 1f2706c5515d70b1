//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stencil - catalog-driven script scaffolding.
#[derive(Debug, Parser)]
#[command(name = "stencil")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the settings file (overrides the default)
    #[arg(long, global = true, env = "STENCIL_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage catalogs
    #[command(subcommand)]
    Catalog(CatalogCommands),

    /// Instantiate a template into a target file
    Init(InitArgs),
}

/// Subcommands of `stencil catalog`.
#[derive(Debug, Clone, Subcommand)]
pub enum CatalogCommands {
    /// Add a catalog
    Add {
        /// A description for the catalog
        #[arg(short, long)]
        description: Option<String>,

        /// A name for the catalog
        name: String,

        /// A file or URL to a catalog file
        url_or_file: String,
    },

    /// Retrieve the latest contents of the catalogs
    Update,

    /// Show currently defined catalogs
    List {
        /// Show the contents of a single catalog
        name: Option<String>,
    },

    /// Remove an existing catalog
    Remove {
        /// The name of the catalog
        name: String,
    },
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, clap::Args)]
pub struct InitArgs {
    /// Template to instantiate
    #[arg(short, long, default_value = "hello")]
    pub template: String,

    /// Properties available as placeholders, as key=value
    #[arg(short = 'D', value_name = "KEY=VALUE", value_parser = parse_key_val, action = clap::ArgAction::Append)]
    pub property: Vec<(String, String)>,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,

    /// Path of the file to generate
    pub output: String,
}

/// Parse a `key=value` property argument.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid property '{s}', expected key=value")),
    }
}
