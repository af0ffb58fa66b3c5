//! `taxotree lca` command implementation
//!
//! Prints the lowest common ancestor of the given taxon ids as a
//! `taxon_id<TAB>rank<TAB>name` row.

use taxotree_core::{TaxId, Taxonomy};

use crate::error::{CliError, Result};

/// Compute and print the LCA of a set of taxon ids
pub fn run(db: &str, ids: &[TaxId]) -> Result<()> {
    let taxonomy = Taxonomy::open(db)?;

    match taxonomy.lca_of(ids.iter().copied()) {
        Some(node) => {
            println!("{}\t{}\t{}", node.taxon_id, node.rank, node.name);
            Ok(())
        },
        None => Err(CliError::invalid_input(
            "none of the given taxon ids are present in the taxonomy",
        )),
    }
}
