//! `taxotree ranks` command implementation
//!
//! Projects a taxon onto a list of canonical ranks and prints one
//! `rank<TAB>name` row per requested rank.

use taxotree_core::{TaxId, Taxonomy, TaxonomyError};

use crate::error::Result;

/// Print the names found at the requested ranks of a taxon's lineage
pub fn run(db: &str, id: TaxId, ranks: &str) -> Result<()> {
    let taxonomy = Taxonomy::open(db)?;
    let requested = taxonomy
        .rank_config()
        .parse_ranks(ranks)
        .map_err(TaxonomyError::from)?;
    let node = taxonomy.node_strict(id)?;

    let names = taxonomy.at_ranks(node, &requested);
    for (rank, name) in requested.iter().zip(names.iter()) {
        println!("{rank}\t{name}");
    }
    Ok(())
}
