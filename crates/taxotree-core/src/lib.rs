//! Taxotree Core Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! An in-memory taxonomy engine over an NCBI-style rooted tree of taxa.
//!
//! # Overview
//!
//! The engine is built once from the three taxdump files and is immutable
//! afterwards:
//!
//! - **Dump loading**: `nodes.dmp` / `names.dmp` / `merged.dmp` parsing
//!   with the `\t|\t` field separator
//! - **Taxon store**: a contiguous arena of taxon records plus a dense
//!   id table that also absorbs merged-id aliases
//! - **LCA queries**: O(1) pairwise lowest common ancestor after linear
//!   preprocessing (Euler tour + sparse-table range-minimum queries)
//! - **Projections**: lineage strings, rank projection, clade-count
//!   aggregation, and weighted-majority LCA classification
//!
//! Once constructed, every query takes `&self`; the engine can be shared
//! freely across threads.
//!
//! # Example
//!
//! ```no_run
//! use taxotree_core::Taxonomy;
//!
//! fn main() -> taxotree_core::Result<()> {
//!     let taxonomy = Taxonomy::open("taxonomy")?;
//!
//!     let lca = taxonomy.lca(9606, 10090);
//!     println!("LCA of human and mouse: {lca}");
//!
//!     if let Some(node) = taxonomy.node(lca) {
//!         println!("lineage: {}", taxonomy.lineage(node, true));
//!     }
//!     Ok(())
//! }
//! ```

pub mod clade;
pub mod dump;
pub mod error;
pub mod euler;
pub mod rmq;
pub mod store;
pub mod taxonomy;
pub mod weighted;

// Re-export commonly used types
pub use clade::TaxonCounts;
pub use dump::TaxdumpFiles;
pub use error::{Result, TaxonomyError};
pub use euler::EulerTour;
pub use rmq::RmqIndex;
pub use store::{TaxId, TaxonNode, TaxonStore};
pub use taxonomy::{Taxonomy, TaxonomyStats};
pub use weighted::{VoteMode, WeightedHit, WeightedLcaResult, MAX_TAX_WEIGHT};
