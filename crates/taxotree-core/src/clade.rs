//! Clade-count aggregation
//!
//! Folds per-taxon evidence counts into per-clade subtree sums: every
//! count contributes to its own taxon and to every ancestor up to the
//! root. Ids with no node keep their own entry but cannot propagate,
//! since their lineage is unreachable.

use std::collections::HashMap;

use serde::Serialize;

use crate::store::TaxId;
use crate::taxonomy::Taxonomy;

/// Aggregated counts for one taxon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaxonCounts {
    /// Evidence assigned directly to this taxon
    pub self_count: u32,
    /// Evidence assigned to this taxon or any descendant
    pub clade_count: u64,
    /// Child taxa that appear in the result, in store insertion order
    pub children: Vec<TaxId>,
}

impl Taxonomy {
    /// Fold per-taxon counts into per-clade sums.
    ///
    /// The result holds one entry per input id plus one per ancestor
    /// reached; each entry's children list contains the live children
    /// that themselves appear in the result, ordered as in the nodes
    /// dump.
    pub fn clade_counts(&self, counts: &HashMap<TaxId, u32>) -> HashMap<TaxId, TaxonCounts> {
        let mut result: HashMap<TaxId, TaxonCounts> = HashMap::new();

        for (&taxon_id, &count) in counts {
            let entry = result.entry(taxon_id).or_default();
            entry.self_count = count;
            entry.clade_count += u64::from(count);

            let Some(mut node) = self.node(taxon_id) else {
                continue;
            };
            while !node.is_root() {
                let Some(parent) = self.node(node.parent_taxon_id) else {
                    break;
                };
                node = parent;
                result.entry(node.taxon_id).or_default().clade_count += u64::from(count);
            }
        }

        for node in self.store().iter() {
            if !node.is_root() && result.contains_key(&node.taxon_id) {
                if let Some(parent_entry) = result.get_mut(&node.parent_taxon_id) {
                    parent_entry.children.push(node.taxon_id);
                }
            }
        }

        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use taxotree_common::RankConfig;

    const NODES: &str = "1\t|\t1\t|\tno rank\t|\n\
                         2\t|\t1\t|\tgenus\t|\n\
                         3\t|\t1\t|\tgenus\t|\n\
                         4\t|\t2\t|\tspecies\t|\n\
                         5\t|\t2\t|\tspecies\t|\n\
                         6\t|\t3\t|\tspecies\t|";

    const NAMES: &str = "1\t|\troot\t|\t\t|\tscientific name\t|\n\
                         2\t|\tAlpha\t|\t\t|\tscientific name\t|\n\
                         3\t|\tBeta\t|\t\t|\tscientific name\t|\n\
                         4\t|\tAlpha one\t|\t\t|\tscientific name\t|\n\
                         5\t|\tAlpha two\t|\t\t|\tscientific name\t|\n\
                         6\t|\tBeta one\t|\t\t|\tscientific name\t|";

    fn sample_taxonomy() -> Taxonomy {
        Taxonomy::from_dump(NODES, NAMES, "", RankConfig::default()).unwrap()
    }

    #[test]
    fn test_counts_propagate_to_ancestors() {
        let taxonomy = sample_taxonomy();
        let counts = HashMap::from([(4, 3), (5, 2), (6, 1)]);
        let clades = taxonomy.clade_counts(&counts);

        assert_eq!(clades[&4].self_count, 3);
        assert_eq!(clades[&4].clade_count, 3);
        assert_eq!(clades[&2].self_count, 0);
        assert_eq!(clades[&2].clade_count, 5);
        assert_eq!(clades[&3].clade_count, 1);
        assert_eq!(clades[&1].clade_count, 6);
    }

    #[test]
    fn test_count_on_internal_node_adds_to_own_clade() {
        let taxonomy = sample_taxonomy();
        let counts = HashMap::from([(2, 10), (4, 1)]);
        let clades = taxonomy.clade_counts(&counts);

        assert_eq!(clades[&2].self_count, 10);
        assert_eq!(clades[&2].clade_count, 11);
        assert_eq!(clades[&1].clade_count, 11);
    }

    #[test]
    fn test_conservation() {
        let taxonomy = sample_taxonomy();
        let counts = HashMap::from([(4, 3), (5, 2), (6, 1), (2, 4)]);
        let clades = taxonomy.clade_counts(&counts);

        let total: u64 = counts.values().map(|&c| u64::from(c)).sum();
        let self_total: u64 = clades.values().map(|c| u64::from(c.self_count)).sum();
        assert_eq!(self_total, total);
        assert_eq!(clades[&1].clade_count, total);
    }

    #[test]
    fn test_unknown_id_contributes_to_own_entry_only() {
        let taxonomy = sample_taxonomy();
        let counts = HashMap::from([(99, 7), (4, 1)]);
        let clades = taxonomy.clade_counts(&counts);

        assert_eq!(clades[&99].self_count, 7);
        assert_eq!(clades[&99].clade_count, 7);
        assert!(clades[&99].children.is_empty());
        // the unknown id never reaches the root
        assert_eq!(clades[&1].clade_count, 1);
    }

    #[test]
    fn test_children_follow_store_insertion_order() {
        let taxonomy = sample_taxonomy();
        let counts = HashMap::from([(6, 1), (5, 1), (4, 1)]);
        let clades = taxonomy.clade_counts(&counts);

        assert_eq!(clades[&1].children, vec![2, 3]);
        assert_eq!(clades[&2].children, vec![4, 5]);
        assert_eq!(clades[&3].children, vec![6]);
        assert!(clades[&4].children.is_empty());
    }

    #[test]
    fn test_merged_alias_counts_toward_target() {
        let taxonomy = Taxonomy::from_dump(
            NODES,
            NAMES,
            "10\t|\t4\t|",
            RankConfig::default(),
        )
        .unwrap();
        let counts = HashMap::from([(10, 2)]);
        let clades = taxonomy.clade_counts(&counts);

        // the alias keeps its own entry but propagates through taxon 4's
        // lineage
        assert_eq!(clades[&10].self_count, 2);
        assert_eq!(clades[&2].clade_count, 2);
        assert_eq!(clades[&1].clade_count, 2);
    }
}
