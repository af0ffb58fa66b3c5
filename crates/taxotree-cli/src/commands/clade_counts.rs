//! `taxotree clade-counts` command implementation
//!
//! Reads `taxon_id<TAB>count` rows, folds them into per-clade subtree
//! sums, and prints one row per clade sorted by taxon id. Counts for
//! duplicate ids accumulate.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use colored::Colorize;
use taxotree_core::{TaxId, Taxonomy};

use crate::commands::read_input;
use crate::config::OutputFormat;
use crate::error::{CliError, Result};

/// Parse `taxon_id<TAB>count` rows; a missing count column means 1.
fn parse_counts(content: &str) -> Result<HashMap<TaxId, u32>> {
    let mut counts: HashMap<TaxId, u32> = HashMap::new();
    for (line_index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let id_field = fields.next().unwrap_or_default();
        let taxon_id: TaxId = id_field.parse().map_err(|_| {
            CliError::invalid_input(format!(
                "line {}: invalid taxon id '{id_field}'",
                line_index + 1
            ))
        })?;
        let count: u32 = match fields.next() {
            Some(field) => field.parse().map_err(|_| {
                CliError::invalid_input(format!(
                    "line {}: invalid count '{field}'",
                    line_index + 1
                ))
            })?,
            None => 1,
        };
        *counts.entry(taxon_id).or_default() += count;
    }
    Ok(counts)
}

/// Aggregate counts over clades and print the result
pub fn run(db: &str, input: Option<&Path>, format: OutputFormat) -> Result<()> {
    let taxonomy = Taxonomy::open(db)?;
    let counts = parse_counts(&read_input(input)?)?;
    let clades = taxonomy.clade_counts(&counts);

    // sort for stable output
    let sorted: BTreeMap<TaxId, _> = clades.into_iter().collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&sorted)?);
        },
        OutputFormat::Text => {
            println!(
                "{}",
                "taxon_id\tself\tclade\tname".cyan().bold()
            );
            for (taxon_id, entry) in &sorted {
                let name = taxonomy
                    .node(*taxon_id)
                    .map(|node| node.name.as_str())
                    .unwrap_or("-");
                println!(
                    "{taxon_id}\t{}\t{}\t{name}",
                    entry.self_count, entry.clade_count
                );
            }
        },
    }
    Ok(())
}
