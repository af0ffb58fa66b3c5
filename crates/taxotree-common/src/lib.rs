//! Taxotree Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared configuration and utilities for the taxotree workspace members:
//!
//! - **Logging**: Centralized tracing subscriber setup
//! - **Ranks**: The canonical taxonomic rank vocabulary and short codes
//!
//! # Example
//!
//! ```no_run
//! use taxotree_common::logging::{init_logging, LogConfig};
//! use taxotree_common::RankConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging(&LogConfig::from_env()?)?;
//!
//!     let ranks = RankConfig::default();
//!     assert!(ranks.contains("species"));
//!     Ok(())
//! }
//! ```

pub mod logging;
pub mod ranks;

// Re-export commonly used types
pub use ranks::{RankConfig, UnknownRankError};
