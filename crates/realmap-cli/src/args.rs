use clap::{Parser, Subcommand};
use realmap_core::config::{DEFAULT_HOST, DEFAULT_PORT, ENV_DATA, ENV_HOST, ENV_PORT};
use realmap_core::LayerKind;
use std::path::PathBuf;

/// CLI arguments for realmap
#[derive(Debug, Parser)]
#[command(
    name = "realmap",
    version,
    about = "CLI for inspecting, searching and serving realmap geodata"
)]
pub struct CliArgs {
    /// Path to the dataset (.json or .json.gz; default: the bundled realm.json)
    #[arg(short = 'i', long = "input", env = ENV_DATA, global = true)]
    pub input: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the dataset contents
    Stats,

    /// List the features of one layer
    Layer {
        /// region, location or landmark
        kind: LayerKind,
    },

    /// Show the info panel of one feature
    Feature {
        /// region, location or landmark
        kind: LayerKind,
        /// Feature id (0..=1000)
        id: String,
    },

    /// Search feature names (case-insensitive)
    Search {
        query: String,
        /// Maximum number of results
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },

    /// Select the best match for a query, as clicking it in the search bar would
    Select { query: String },

    /// Run the HTTP API
    Serve {
        /// Host to bind to
        #[arg(long, env = ENV_HOST, default_value = DEFAULT_HOST)]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = ENV_PORT, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}
