//! Subcommand definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Web server arguments. Unset values come from configuration.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Storage inspection commands.
#[derive(Debug, Subcommand)]
pub enum StorageCommand {
    /// Show the active backend and object counts per class
    Stats {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Print stored objects
    List {
        /// Only objects of this class (State, City, User, Place, Amenity, Review)
        class: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
