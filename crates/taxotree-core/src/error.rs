//! Error types for the taxonomy engine
//!
//! Construction-time problems (unreadable dumps, malformed rows, dangling
//! parent references) are fatal and reported with the offending value so
//! the operator can locate the bad input. Query-time unknown taxa are not
//! errors at this level; the query APIs log and skip them, except where a
//! caller explicitly asked for strict resolution.

use thiserror::Error;

use crate::store::TaxId;

/// Result type alias for taxonomy operations
pub type Result<T> = std::result::Result<T, TaxonomyError>;

/// Error type for taxonomy construction and strict queries
#[derive(Error, Debug)]
pub enum TaxonomyError {
    /// File system operations failed
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// A dump file could not be read
    #[error("Failed to read '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Neither the prefixed nor the bare dump files were found
    #[error(
        "Taxonomy dump files not found: looked for '{prefix}_nodes.dmp', \
         '{prefix}_names.dmp', '{prefix}_merged.dmp' and for bare \
         nodes.dmp, names.dmp, merged.dmp in the working directory"
    )]
    DumpNotFound { prefix: String },

    /// A dump row could not be parsed
    #[error("Malformed row in {file} at line {line}: {reason}")]
    Format {
        file: String,
        line: usize,
        reason: String,
    },

    /// A parent reference does not resolve to any node
    #[error("Inconsistent nodes file: cannot find parent taxon with id {taxon_id}")]
    InconsistentTopology { taxon_id: TaxId },

    /// The same taxon id appeared twice with different parents
    #[error(
        "Duplicate taxon id {taxon_id} with conflicting parents \
         {first_parent} and {second_parent}"
    )]
    DuplicateTaxon {
        taxon_id: TaxId,
        first_parent: TaxId,
        second_parent: TaxId,
    },

    /// No node with `parent == self` was found
    #[error("No root node found (expected exactly one node that is its own parent)")]
    MissingRoot,

    /// More than one node with `parent == self` was found
    #[error("Multiple root nodes found: taxon ids {first} and {second}")]
    MultipleRoots { first: TaxId, second: TaxId },

    /// Part of the tree is unreachable from the root
    #[error("Taxonomy tree is not connected: traversal covered {visited} of {total} nodes")]
    Disconnected { visited: usize, total: usize },

    /// A taxon id does not resolve to any node
    #[error("Taxon id {taxon_id} does not match a legal taxonomy node")]
    UnknownTaxon { taxon_id: TaxId },

    /// An unknown rank or vote mode was requested
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl TaxonomyError {
    /// Create a read-file error
    pub fn read_file(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a format error for a dump row
    pub fn format(file: impl Into<String>, line: usize, reason: impl Into<String>) -> Self {
        Self::Format {
            file: file.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Create an inconsistent-topology error
    pub fn inconsistent_topology(taxon_id: TaxId) -> Self {
        Self::InconsistentTopology { taxon_id }
    }

    /// Create an unknown-taxon error
    pub fn unknown_taxon(taxon_id: TaxId) -> Self {
        Self::UnknownTaxon { taxon_id }
    }

    /// Create an invalid-configuration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

impl From<taxotree_common::UnknownRankError> for TaxonomyError {
    fn from(err: taxotree_common::UnknownRankError) -> Self {
        Self::InvalidConfiguration {
            message: err.to_string(),
        }
    }
}
