//! Weighted-majority lowest common ancestor
//!
//! Given a set of weighted taxon hits, the algorithm accumulates each
//! hit's weight along its whole path to the root, then selects the most
//! specific **candidate** covering at least the requested fraction of the
//! total weight. A node is a candidate when it is itself a hit, or when
//! evidence has reached it through at least two distinct child branches;
//! a node fed by a single branch only relays its child's vote and must
//! not outrank it.
//!
//! Specificity of a candidate is the first vocabulary rank found walking
//! from the candidate toward the root; the walk stops before the root, so
//! a root candidate always scores worst and wins only when nothing more
//! specific clears the cutoff.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Result, TaxonomyError};
use crate::store::TaxId;
use crate::taxonomy::Taxonomy;

/// Ceiling weight for e-values so good they underflow to zero.
pub const MAX_TAX_WEIGHT: f64 = 1000.0;

/// How a hit's evidence value translates into a vote weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VoteMode {
    /// Every hit votes with weight 1
    Uniform,
    /// Weight is `-ln(evalue)`, clamped for non-positive e-values;
    /// the `f64::MAX` sentinel passes through untouched
    MinusLogEvalue,
    /// The evidence value is the weight, verbatim
    RawScore,
}

impl std::str::FromStr for VoteMode {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uniform" => Ok(VoteMode::Uniform),
            "minus-log-evalue" | "minus_log_evalue" => Ok(VoteMode::MinusLogEvalue),
            "raw-score" | "raw_score" | "score" => Ok(VoteMode::RawScore),
            _ => Err(TaxonomyError::invalid_configuration(format!(
                "invalid vote mode '{s}' (expected uniform, minus-log-evalue or raw-score)"
            ))),
        }
    }
}

impl std::fmt::Display for VoteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteMode::Uniform => write!(f, "uniform"),
            VoteMode::MinusLogEvalue => write!(f, "minus-log-evalue"),
            VoteMode::RawScore => write!(f, "raw-score"),
        }
    }
}

/// One taxon hit with its derived vote weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedHit {
    pub taxon_id: TaxId,
    pub weight: f64,
}

impl WeightedHit {
    /// Derive the vote weight from an evidence value under a vote mode.
    pub fn new(taxon_id: TaxId, evalue: f64, mode: VoteMode) -> Self {
        let weight = match mode {
            VoteMode::Uniform => 1.0,
            VoteMode::MinusLogEvalue => {
                if evalue == f64::MAX {
                    evalue
                } else if evalue > 0.0 {
                    -evalue.ln()
                } else {
                    MAX_TAX_WEIGHT
                }
            },
            VoteMode::RawScore => evalue,
        };
        Self { taxon_id, weight }
    }
}

/// Outcome of a weighted-majority LCA run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedLcaResult {
    /// Selected taxon, or 0 when no candidate met the cutoff
    pub taxon_id: TaxId,
    /// Hits that resolved to a node
    pub assigned: usize,
    /// Hits with taxon id 0
    pub unassigned: usize,
    /// Hits whose lineage contains the selected taxon
    pub agreeing: usize,
    /// Weight fraction covered by the selected taxon
    pub selected_percent: f64,
}

/// Per-ancestor accumulator for one weighted-majority run.
#[derive(Debug, Clone)]
struct VoteTally {
    weight: f64,
    is_candidate: bool,
    last_child: TaxId,
}

impl VoteTally {
    fn update(&mut self, weight: f64, child: TaxId) {
        if self.last_child != child {
            self.is_candidate = true;
            self.last_child = child;
        }
        self.weight += weight;
    }
}

impl Taxonomy {
    /// Run the weighted-majority LCA over a set of hits.
    ///
    /// Hits with taxon id 0 are counted as unassigned and carry no
    /// weight; hits whose id does not resolve to a node are fatal.
    /// `majority_cutoff` is the weight fraction, in `[0, 1]`, a candidate
    /// must cover to qualify.
    pub fn weighted_majority_lca(
        &self,
        hits: &[WeightedHit],
        majority_cutoff: f64,
    ) -> Result<WeightedLcaResult> {
        // ordered map keeps the selection scan deterministic on ties
        let mut tallies: BTreeMap<TaxId, VoteTally> = BTreeMap::new();

        let mut assigned = 0usize;
        let mut unassigned = 0usize;
        let mut total_weight = 0.0f64;

        for hit in hits {
            if hit.taxon_id == 0 {
                unassigned += 1;
                continue;
            }
            let node = self.node_strict(hit.taxon_id)?;
            total_weight += hit.weight;
            assigned += 1;

            // the start of a path is a candidate in its own right
            tallies
                .entry(hit.taxon_id)
                .and_modify(|tally| tally.update(hit.weight, 0))
                .or_insert(VoteTally {
                    weight: hit.weight,
                    is_candidate: true,
                    last_child: 0,
                });

            let mut child_id = hit.taxon_id;
            let mut current = node;
            while current.parent_taxon_id != child_id {
                let parent_id = current.parent_taxon_id;
                tallies
                    .entry(parent_id)
                    .and_modify(|tally| tally.update(hit.weight, child_id))
                    .or_insert(VoteTally {
                        weight: hit.weight,
                        is_candidate: false,
                        last_child: child_id,
                    });
                child_id = parent_id;
                current = self.node_strict(parent_id)?;
            }
        }

        // among qualifying candidates, prefer the one whose lineage
        // carries the most specific rank; break ties by coverage
        let mut selected: TaxId = 0;
        let mut min_rank = usize::MAX;
        let mut selected_percent = 0.0f64;

        for (&taxon_id, tally) in &tallies {
            if !tally.is_candidate {
                continue;
            }
            let percent = tally.weight / total_weight;
            // a NaN fraction (zero total weight) must not qualify
            let qualifies = percent >= majority_cutoff;
            if !qualifies {
                continue;
            }

            let mut current = self.node_strict(taxon_id)?;
            let mut current_min = usize::MAX;
            while current.parent_taxon_id != current.taxon_id {
                if let Some(index) = self.rank_config().rank_index(&current.rank) {
                    // ranks only get broader toward the root
                    current_min = index;
                    break;
                }
                current = self.node_strict(current.parent_taxon_id)?;
            }

            if current_min < min_rank || (current_min == min_rank && percent > selected_percent) {
                selected = taxon_id;
                min_rank = current_min;
                selected_percent = percent;
            }
        }

        let agreeing = self.count_agreeing(hits, assigned, selected)?;

        Ok(WeightedLcaResult {
            taxon_id: selected,
            assigned,
            unassigned,
            agreeing,
            selected_percent,
        })
    }

    /// Number of hits whose lineage contains the selected taxon.
    fn count_agreeing(
        &self,
        hits: &[WeightedHit],
        assigned: usize,
        selected: TaxId,
    ) -> Result<usize> {
        if selected == 0 {
            return Ok(0);
        }
        if selected == self.root().taxon_id {
            // every assigned hit descends from the root
            return Ok(assigned);
        }

        let mut agreeing = 0usize;
        for hit in hits {
            if hit.taxon_id == 0 {
                continue;
            }
            let mut current = self.node_strict(hit.taxon_id)?;
            loop {
                if current.taxon_id == selected {
                    agreeing += 1;
                    break;
                }
                if current.is_root() {
                    break;
                }
                current = self.node_strict(current.parent_taxon_id)?;
            }
        }
        Ok(agreeing)
    }
}
