//! The indexed taxonomy engine
//!
//! [`Taxonomy`] ties the taxon store, the Euler tour, and the RMQ index
//! together into one immutable structure. Construction runs through a
//! fixed sequence — load nodes, apply merged aliases, resolve names,
//! index — and only hands out a value once the last step has finished,
//! so every query below operates on a fully indexed tree. All query
//! methods take `&self` and allocate no shared state, which makes the
//! engine safe to share across threads once built.
//!
//! Query-time unknown taxa are logged at warn level and skipped; only
//! construction problems and explicitly strict lookups fault.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use taxotree_common::RankConfig;

use crate::dump::{self, TaxdumpFiles};
use crate::error::Result;
use crate::euler::EulerTour;
use crate::rmq::RmqIndex;
use crate::store::{TaxId, TaxonNode, TaxonStore};

/// Literal emitted by [`Taxonomy::at_ranks`] for ranks the lineage never
/// reaches.
pub const UNKNOWN_RANK_NAME: &str = "unknown";

/// Prefix emitted by [`Taxonomy::at_ranks`] when the requested rank lies
/// below the node itself.
pub const UNCLASSIFIED_PREFIX: &str = "uc_";

/// Summary counters for a loaded taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyStats {
    /// Number of live taxa
    pub nodes: usize,
    /// Number of merged-id aliases installed
    pub merged_aliases: usize,
    /// Largest live taxon id
    pub max_taxon_id: TaxId,
    /// Taxon id of the root
    pub root_taxon_id: TaxId,
    /// Length of the Euler tour (twice the node count)
    pub tour_length: usize,
}

/// An immutable, fully indexed taxonomy.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    store: TaxonStore,
    ranks: RankConfig,
    visit: Vec<u32>,
    first: Vec<usize>,
    rmq: RmqIndex,
}

impl Taxonomy {
    /// Load a taxonomy for a database prefix, with the default rank
    /// vocabulary.
    ///
    /// Looks for `<prefix>_nodes.dmp` / `<prefix>_names.dmp` /
    /// `<prefix>_merged.dmp`, falling back to the bare file names in the
    /// working directory.
    pub fn open(prefix: &str) -> Result<Self> {
        info!(prefix, "Loading taxonomy");
        let files = TaxdumpFiles::discover(prefix)?;
        Self::from_files(&files, RankConfig::default())
    }

    /// Load a taxonomy from explicit dump file locations.
    pub fn from_files(files: &TaxdumpFiles, ranks: RankConfig) -> Result<Self> {
        let nodes = dump::read_dump(&files.nodes)?;
        let names = dump::read_dump(&files.names)?;
        let merged = dump::read_dump(&files.merged)?;
        Self::from_dump_with_labels(
            &nodes,
            &names,
            &merged,
            ranks,
            &files.nodes.display().to_string(),
            &files.names.display().to_string(),
            &files.merged.display().to_string(),
        )
    }

    /// Build a taxonomy from in-memory dump contents.
    pub fn from_dump(nodes: &str, names: &str, merged: &str, ranks: RankConfig) -> Result<Self> {
        Self::from_dump_with_labels(
            nodes,
            names,
            merged,
            ranks,
            "nodes.dmp",
            "names.dmp",
            "merged.dmp",
        )
    }

    fn from_dump_with_labels(
        nodes: &str,
        names: &str,
        merged: &str,
        ranks: RankConfig,
        nodes_label: &str,
        names_label: &str,
        merged_label: &str,
    ) -> Result<Self> {
        debug!("Loading nodes");
        let records = dump::parse_nodes(nodes, nodes_label)?;
        let mut store = TaxonStore::from_records(records, nodes_label)?;
        info!(nodes = store.len(), "Loaded taxon nodes");

        debug!("Applying merged ids");
        let pairs = dump::parse_merged(merged, merged_label)?;
        let installed = store.apply_merged(&pairs);
        info!(aliases = installed, "Applied merged taxon ids");

        debug!("Resolving names");
        let name_records = dump::parse_names(names, names_label)?;
        store.resolve_names(name_records)?;

        debug!("Building Euler tour and range-minimum index");
        let tour = EulerTour::build(&store)?;
        let (visit, first, rmq) = RmqIndex::from_tour(tour);
        info!(tour_length = visit.len(), "Taxonomy indexed");

        Ok(Self {
            store,
            ranks,
            visit,
            first,
            rmq,
        })
    }

    /// The underlying taxon store.
    pub fn store(&self) -> &TaxonStore {
        &self.store
    }

    /// The rank vocabulary the engine was built with.
    pub fn rank_config(&self) -> &RankConfig {
        &self.ranks
    }

    /// The root record.
    pub fn root(&self) -> &TaxonNode {
        self.store.root()
    }

    /// Whether a taxon id resolves to a node.
    pub fn exists(&self, taxon_id: TaxId) -> bool {
        self.store.exists(taxon_id)
    }

    /// Resolve a taxon id leniently.
    pub fn node(&self, taxon_id: TaxId) -> Option<&TaxonNode> {
        self.store.node(taxon_id)
    }

    /// Resolve a taxon id strictly, faulting when absent.
    pub fn node_strict(&self, taxon_id: TaxId) -> Result<&TaxonNode> {
        self.store.node_strict(taxon_id)
    }

    /// Summary counters for this taxonomy.
    pub fn stats(&self) -> TaxonomyStats {
        TaxonomyStats {
            nodes: self.store.len(),
            merged_aliases: self.store.merged_aliases(),
            max_taxon_id: self.store.max_taxon_id(),
            root_taxon_id: self.root().taxon_id,
            tour_length: self.visit.len(),
        }
    }

    /// Lowest common ancestor on internal indices.
    ///
    /// Index 0 doubles as the unassigned sentinel: when either side is 0
    /// the result is 0, which coincides with the root slot for dumps that
    /// list the root first.
    pub(crate) fn lca_internal(&self, a: usize, b: usize) -> usize {
        if a == 0 || b == 0 {
            return 0;
        }
        if a == b {
            return a;
        }
        let (i, j) = if self.first[a] < self.first[b] {
            (self.first[a], self.first[b])
        } else {
            (self.first[b], self.first[a])
        };
        self.visit[self.rmq.query(i, j)] as usize
    }

    /// Lowest common ancestor of two taxon ids.
    ///
    /// When one id is unknown the other is returned, so a single bad id
    /// degrades gracefully instead of poisoning the query.
    pub fn lca(&self, a: TaxId, b: TaxId) -> TaxId {
        let Some(a_internal) = self.store.internal_of(a) else {
            return b;
        };
        let Some(b_internal) = self.store.internal_of(b) else {
            return a;
        };
        self.store
            .node_at(self.lca_internal(a_internal, b_internal))
            .taxon_id
    }

    /// Lowest common ancestor of a set of taxon ids.
    ///
    /// Unknown ids are logged and skipped; the result is `None` only when
    /// no id in the set is known.
    pub fn lca_of<I>(&self, ids: I) -> Option<&TaxonNode>
    where
        I: IntoIterator<Item = TaxId>,
    {
        let mut result: Option<usize> = None;
        for taxon_id in ids {
            match self.store.internal_of(taxon_id) {
                Some(index) => {
                    result = Some(match result {
                        Some(acc) => self.lca_internal(acc, index),
                        None => index,
                    });
                },
                None => {
                    warn!(taxon_id, "No node for taxon id, ignoring it");
                },
            }
        }
        result.map(|index| self.store.node_at(index))
    }

    /// Whether `ancestor` lies on the path from `child` to the root.
    ///
    /// Equal ids are ancestors of themselves; unknown ids are logged and
    /// answer `false`.
    pub fn is_ancestor(&self, ancestor: TaxId, child: TaxId) -> bool {
        if ancestor == child {
            return true;
        }
        if ancestor == 0 || child == 0 {
            return false;
        }
        let Some(child_internal) = self.store.internal_of(child) else {
            warn!(taxon_id = child, "No node for taxon id");
            return false;
        };
        let Some(ancestor_internal) = self.store.internal_of(ancestor) else {
            warn!(taxon_id = ancestor, "No node for taxon id");
            return false;
        };
        self.lca_internal(child_internal, ancestor_internal) == ancestor_internal
    }

    /// All vocabulary ranks on the path from `node` to the root, mapped
    /// to the scientific name of the nearest ancestor holding each rank.
    ///
    /// `no rank` placeholders are suppressed, except that the root is
    /// always inserted under its literal rank.
    pub fn all_ranks(&self, node: &TaxonNode) -> HashMap<String, String> {
        let mut result = HashMap::new();
        let mut current = node;
        loop {
            if current.is_root() {
                result
                    .entry(current.rank.clone())
                    .or_insert_with(|| current.name.clone());
                return result;
            }
            if current.rank != "no rank" && current.rank != "no_rank" {
                result
                    .entry(current.rank.clone())
                    .or_insert_with(|| current.name.clone());
            }
            let Some(parent) = self.store.node(current.parent_taxon_id) else {
                return result;
            };
            current = parent;
        }
    }

    /// Project a node onto a list of requested ranks.
    ///
    /// Each requested rank yields the name found at that rank on the
    /// node's lineage; when the requested rank is more specific than the
    /// node's own, the node cannot be classified at that level and
    /// `uc_<name>` is emitted instead; anything else yields the literal
    /// `unknown`.
    pub fn at_ranks(&self, node: &TaxonNode, requested: &[String]) -> Vec<String> {
        let all = self.all_ranks(node);
        let base_index = self.ranks.rank_index(&node.rank);
        let unclassified = format!("{UNCLASSIFIED_PREFIX}{}", node.name);

        requested
            .iter()
            .map(|rank| {
                if let Some(name) = all.get(rank) {
                    return name.clone();
                }
                let below_node = match (self.ranks.rank_index(rank), base_index) {
                    (Some(requested_index), Some(node_index)) => requested_index < node_index,
                    _ => false,
                };
                if below_node {
                    unclassified.clone()
                } else {
                    UNKNOWN_RANK_NAME.to_string()
                }
            })
            .collect()
    }

    /// Render the lineage of a node from the root down, joined by `;`.
    ///
    /// With `as_names` each step renders as `<short code>_<name>`,
    /// otherwise as the taxon id.
    pub fn lineage(&self, node: &TaxonNode, as_names: bool) -> String {
        let mut chain = Vec::new();
        let mut current = node;
        loop {
            chain.push(current);
            if current.is_root() {
                break;
            }
            let Some(parent) = self.store.node(current.parent_taxon_id) else {
                break;
            };
            current = parent;
        }

        let mut rendered = String::with_capacity(chain.len() * 16);
        for (i, step) in chain.iter().rev().enumerate() {
            if i > 0 {
                rendered.push(';');
            }
            if as_names {
                rendered.push(self.ranks.short_code(&step.rank));
                rendered.push('_');
                rendered.push_str(&step.name);
            } else {
                rendered.push_str(&step.taxon_id.to_string());
            }
        }
        rendered
    }
}
