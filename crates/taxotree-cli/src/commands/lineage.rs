//! `taxotree lineage` command implementation
//!
//! Prints the lineage of a taxon from the root down, either as taxon ids
//! or as `<short rank>_<name>` steps.

use taxotree_core::{TaxId, Taxonomy};

use crate::error::Result;

/// Print the lineage of a taxon
pub fn run(db: &str, id: TaxId, as_names: bool) -> Result<()> {
    let taxonomy = Taxonomy::open(db)?;
    let node = taxonomy.node_strict(id)?;

    println!("{}", taxonomy.lineage(node, as_names));
    Ok(())
}
