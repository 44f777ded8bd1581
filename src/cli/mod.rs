//! Command-line interface for opkb.

mod commands;

use clap::{Parser, Subcommand};

/// One Piece Knowledge Base
/// Catalog of characters, crews, devil fruits, arcs and episodes
#[derive(Parser)]
#[command(name = "opkb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve,

    /// Load the builtin One Piece dataset
    Seed {
        /// Delete every catalog row first
        #[arg(long)]
        reset: bool,
        /// Number of characters to create (0 = all)
        #[arg(long, default_value_t = 0)]
        characters: usize,
        /// Number of crews to create (0 = all)
        #[arg(long, default_value_t = 0)]
        crews: usize,
        /// Number of devil fruits to create (0 = all)
        #[arg(long, default_value_t = 0)]
        fruits: usize,
        /// Number of arcs to create (0 = all)
        #[arg(long, default_value_t = 0)]
        arcs: usize,
        /// Number of episodes to create
        #[arg(long, default_value_t = 200)]
        episodes: usize,
        /// Fixed seed for the randomized optional fields
        #[arg(long)]
        rng_seed: Option<u64>,
    },

    /// Dump the whole catalog to a JSON file
    Export {
        /// Target directory (defaults to `exports.exports_path`)
        #[arg(long)]
        output_dir: Option<String>,
    },

    /// Print row counts
    Stats,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Issue a new API key for a user
    RotateKey {
        #[arg(default_value = "admin")]
        username: String,
    },
}

pub use commands::*;
