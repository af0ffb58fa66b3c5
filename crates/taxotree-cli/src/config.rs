//! Configuration for the taxotree CLI
//!
//! Handles the database prefix, the default rank list, and output format
//! selection.

use crate::error::{CliError, Result};

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Default database prefix when not specified via flag or environment.
pub const DEFAULT_DB_PREFIX: &str = "taxonomy";

/// Default rank list for rank projections.
pub const DEFAULT_RANKS: &str = "superkingdom,phylum,class,order,family,genus,species";

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(CliError::config(format!(
                "invalid output format '{s}' (expected text or json)"
            ))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
