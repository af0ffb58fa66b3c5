//! Taxotree CLI Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Command-line interface over the taxotree taxonomy engine:
//!
//! - **LCA queries**: lowest common ancestor of taxon ids (`taxotree lca`)
//! - **Lineages**: full lineage of a taxon (`taxotree lineage`)
//! - **Rank projection**: names at requested ranks (`taxotree ranks`)
//! - **Clade counts**: fold per-taxon counts into subtree sums
//!   (`taxotree clade-counts`)
//! - **Classification**: weighted-majority LCA over hit sets
//!   (`taxotree classify`)
//! - **Summary**: taxonomy statistics (`taxotree info`)
//!
//! The taxonomy is located through a database prefix: `--db PREFIX` reads
//! `PREFIX_nodes.dmp`, `PREFIX_names.dmp` and `PREFIX_merged.dmp`, falling
//! back to the bare file names in the working directory.

pub mod commands;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::OutputFormat;
pub use error::{CliError, Result};

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use taxotree_core::{TaxId, VoteMode};

/// Taxotree - taxonomy LCA queries over NCBI-style dumps
#[derive(Parser, Debug)]
#[command(name = "taxotree")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database prefix for the dump files
    #[arg(
        long,
        env = "TAXOTREE_DB",
        default_value = config::DEFAULT_DB_PREFIX,
        global = true
    )]
    pub db: String,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lowest common ancestor of a set of taxon ids
    Lca {
        /// Taxon ids (unknown ids are skipped with a warning)
        #[arg(required = true, num_args = 1..)]
        ids: Vec<TaxId>,
    },

    /// Print the lineage of a taxon from the root down
    Lineage {
        /// Taxon id
        id: TaxId,

        /// Render ranks and scientific names instead of taxon ids
        #[arg(short, long)]
        names: bool,
    },

    /// Project a taxon onto a list of canonical ranks
    Ranks {
        /// Taxon id
        id: TaxId,

        /// Comma-separated ranks to project onto
        #[arg(short, long, default_value = config::DEFAULT_RANKS)]
        ranks: String,
    },

    /// Fold per-taxon counts into per-clade subtree sums
    CladeCounts {
        /// Input file with `taxon_id<TAB>count` rows (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Weighted-majority LCA classification of a hit set
    Classify {
        /// Input file with `taxon_id<TAB>evalue` rows (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// How evidence values translate into vote weights
        #[arg(long, default_value = "uniform")]
        vote_mode: VoteMode,

        /// Weight fraction a candidate must cover, in [0, 1]
        #[arg(long, default_value_t = 0.5)]
        majority: f64,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show summary statistics of the loaded taxonomy
    Info {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}
