//! `taxotree classify` command implementation
//!
//! Reads `taxon_id<TAB>evalue` hit rows, derives vote weights under the
//! selected mode, and runs the weighted-majority LCA.

use std::path::Path;

use colored::Colorize;
use taxotree_core::{TaxId, Taxonomy, VoteMode, WeightedHit};

use crate::commands::read_input;
use crate::config::OutputFormat;
use crate::error::{CliError, Result};

/// Parse `taxon_id<TAB>evalue` rows; a missing evalue column means 1.0.
fn parse_hits(content: &str, mode: VoteMode) -> Result<Vec<WeightedHit>> {
    let mut hits = Vec::new();
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
        let evalue: f64 = match fields.next() {
            Some(field) => field.parse().map_err(|_| {
                CliError::invalid_input(format!(
                    "line {}: invalid evidence value '{field}'",
                    line_index + 1
                ))
            })?,
            None => 1.0,
        };
        hits.push(WeightedHit::new(taxon_id, evalue, mode));
    }
    Ok(hits)
}

/// Run the weighted-majority LCA and print the outcome
pub fn run(
    db: &str,
    input: Option<&Path>,
    vote_mode: VoteMode,
    majority: f64,
    format: OutputFormat,
) -> Result<()> {
    if !(0.0..=1.0).contains(&majority) {
        return Err(CliError::invalid_input(format!(
            "majority cutoff {majority} out of range [0, 1]"
        )));
    }

    let taxonomy = Taxonomy::open(db)?;
    let hits = parse_hits(&read_input(input)?, vote_mode)?;
    let result = taxonomy.weighted_majority_lca(&hits, majority)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        },
        OutputFormat::Text => {
            let name = taxonomy
                .node(result.taxon_id)
                .map(|node| node.name.as_str())
                .unwrap_or("unassigned");

            println!("{}", "Classification:".cyan().bold());
            println!("  Selected:  {} ({name})", result.taxon_id);
            println!("  Coverage:  {:.2}%", result.selected_percent * 100.0);
            println!("  Assigned:  {}", result.assigned);
            println!("  Unassigned: {}", result.unassigned);
            println!("  Agreeing:  {}", result.agreeing);
        },
    }
    Ok(())
}
