//! `taxotree info` command implementation
//!
//! Shows summary statistics of the loaded taxonomy.

use colored::Colorize;
use taxotree_core::Taxonomy;

use crate::config::OutputFormat;
use crate::error::Result;

/// Print taxonomy summary statistics
pub fn run(db: &str, format: OutputFormat) -> Result<()> {
    let taxonomy = Taxonomy::open(db)?;
    let stats = taxonomy.stats();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        },
        OutputFormat::Text => {
            let root = taxonomy.root();
            println!("{}", "Taxonomy:".cyan().bold());
            println!("  Nodes:          {}", stats.nodes);
            println!("  Merged aliases: {}", stats.merged_aliases);
            println!("  Max taxon id:   {}", stats.max_taxon_id);
            println!("  Root:           {} ({})", stats.root_taxon_id, root.name);
            println!("  Tour length:    {}", stats.tour_length);
        },
    }
    Ok(())
}
