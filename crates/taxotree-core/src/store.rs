//! Taxon store: the arena of taxon records and the dense id table
//!
//! All taxa live in one contiguous vector in nodes-file insertion order;
//! everything else refers to them by their dense 0-based internal index.
//! A direct-addressed table sized `max taxon id + 1` maps external taxon
//! ids to internal indices in O(1); merged ids are installed into the same
//! table as aliases of their live target, so an alias resolves in one hop
//! and is indistinguishable from the target everywhere downstream.

use serde::Serialize;

use crate::error::{Result, TaxonomyError};

/// The integer taxon identifier used in dump files and public APIs.
///
/// Live nodes have ids `>= 1`; id 0 is reserved as the "unassigned"
/// sentinel and never resolves to a node.
pub type TaxId = i32;

/// Slot value in the dense id table for ids with no node.
const ABSENT: i32 = -1;

/// A single taxon record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonNode {
    /// Dense 0-based position in the store
    pub internal_index: usize,
    /// External taxon id (`>= 1`)
    pub taxon_id: TaxId,
    /// External taxon id of the parent; the root is its own parent
    pub parent_taxon_id: TaxId,
    /// Rank string from the open dump vocabulary ("species", "no rank", ...)
    pub rank: String,
    /// Scientific name; empty until the names dump is resolved
    pub name: String,
}

impl TaxonNode {
    /// Whether this node is the tree root (its own parent).
    pub fn is_root(&self) -> bool {
        self.parent_taxon_id == self.taxon_id
    }
}

/// A raw nodes-dump row before the store is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub taxon_id: TaxId,
    pub parent_taxon_id: TaxId,
    pub rank: String,
}

/// A scientific-name assignment from the names dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    pub taxon_id: TaxId,
    pub name: String,
}

/// The taxon arena plus the dense external-id lookup table.
#[derive(Debug, Clone)]
pub struct TaxonStore {
    nodes: Vec<TaxonNode>,
    id_table: Vec<i32>,
    root_internal: usize,
    max_taxon_id: TaxId,
    merged_aliases: usize,
}

impl TaxonStore {
    /// Assemble the store from parsed nodes rows.
    ///
    /// Validates that ids are positive, that duplicate ids agree on their
    /// parent, that every parent reference resolves, and that exactly one
    /// node is its own parent.
    pub(crate) fn from_records(records: Vec<NodeRecord>, file: &str) -> Result<Self> {
        if records.is_empty() {
            return Err(TaxonomyError::MissingRoot);
        }

        let mut max_taxon_id: TaxId = 0;
        for record in &records {
            if record.taxon_id < 1 {
                return Err(TaxonomyError::format(
                    file,
                    0,
                    format!("taxon id {} out of domain (must be >= 1)", record.taxon_id),
                ));
            }
            max_taxon_id = max_taxon_id.max(record.taxon_id);
        }

        let mut nodes: Vec<TaxonNode> = Vec::with_capacity(records.len());
        let mut id_table = vec![ABSENT; max_taxon_id as usize + 1];
        for record in records {
            let slot = &mut id_table[record.taxon_id as usize];
            if *slot != ABSENT {
                let existing = &nodes[*slot as usize];
                if existing.parent_taxon_id != record.parent_taxon_id {
                    return Err(TaxonomyError::DuplicateTaxon {
                        taxon_id: record.taxon_id,
                        first_parent: existing.parent_taxon_id,
                        second_parent: record.parent_taxon_id,
                    });
                }
                // identical duplicate row, keep the first
                continue;
            }
            *slot = nodes.len() as i32;
            nodes.push(TaxonNode {
                internal_index: nodes.len(),
                taxon_id: record.taxon_id,
                parent_taxon_id: record.parent_taxon_id,
                rank: record.rank,
                name: String::new(),
            });
        }

        let mut root_internal = None;
        for node in &nodes {
            let parent = node.parent_taxon_id;
            if parent < 0
                || parent as usize >= id_table.len()
                || id_table[parent as usize] == ABSENT
            {
                return Err(TaxonomyError::inconsistent_topology(parent));
            }
            if node.is_root() {
                match root_internal {
                    None => root_internal = Some(node.internal_index),
                    Some(first) => {
                        return Err(TaxonomyError::MultipleRoots {
                            first: nodes[first].taxon_id,
                            second: node.taxon_id,
                        })
                    },
                }
            }
        }
        let root_internal = root_internal.ok_or(TaxonomyError::MissingRoot)?;

        Ok(Self {
            nodes,
            id_table,
            root_internal,
            max_taxon_id,
            merged_aliases: 0,
        })
    }

    /// Install merged-id aliases into the id table.
    ///
    /// An alias is installed only when the old id has no node of its own
    /// and the new id does, so a lookup of the old id lands directly on
    /// the live target. Returns the number of aliases installed.
    pub(crate) fn apply_merged(&mut self, pairs: &[(TaxId, TaxId)]) -> usize {
        let mut installed = 0;
        for &(old_id, new_id) in pairs {
            if old_id < 1 || self.exists(old_id) {
                continue;
            }
            let Some(target) = self.internal_of(new_id) else {
                continue;
            };
            if old_id as usize >= self.id_table.len() {
                self.id_table.resize(old_id as usize + 1, ABSENT);
            }
            self.id_table[old_id as usize] = target as i32;
            installed += 1;
        }
        self.merged_aliases = installed;
        installed
    }

    /// Attach scientific names to their nodes.
    ///
    /// The first name seen for a taxon wins; a name row whose taxon id
    /// does not resolve is fatal.
    pub(crate) fn resolve_names(&mut self, names: Vec<NameRecord>) -> Result<()> {
        for record in names {
            let index = self
                .internal_of(record.taxon_id)
                .ok_or_else(|| TaxonomyError::unknown_taxon(record.taxon_id))?;
            let node = &mut self.nodes[index];
            if node.name.is_empty() {
                node.name = record.name;
            }
        }
        Ok(())
    }

    /// Number of live taxa in the store.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the store holds no taxa.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate the records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, TaxonNode> {
        self.nodes.iter()
    }

    /// The record at a dense internal index.
    pub fn node_at(&self, internal_index: usize) -> &TaxonNode {
        &self.nodes[internal_index]
    }

    /// Resolve a taxon id to its internal index, following merged aliases.
    pub fn internal_of(&self, taxon_id: TaxId) -> Option<usize> {
        if taxon_id < 0 {
            return None;
        }
        let slot = *self.id_table.get(taxon_id as usize)?;
        (slot != ABSENT).then_some(slot as usize)
    }

    /// Whether a taxon id resolves to a node (directly or via an alias).
    pub fn exists(&self, taxon_id: TaxId) -> bool {
        self.internal_of(taxon_id).is_some()
    }

    /// Resolve a taxon id to its record, or `None` when absent.
    pub fn node(&self, taxon_id: TaxId) -> Option<&TaxonNode> {
        self.internal_of(taxon_id).map(|i| &self.nodes[i])
    }

    /// Resolve a taxon id to its record, faulting when absent.
    pub fn node_strict(&self, taxon_id: TaxId) -> Result<&TaxonNode> {
        self.node(taxon_id)
            .ok_or_else(|| TaxonomyError::unknown_taxon(taxon_id))
    }

    /// The root record.
    pub fn root(&self) -> &TaxonNode {
        &self.nodes[self.root_internal]
    }

    /// The root's internal index.
    pub fn root_internal(&self) -> usize {
        self.root_internal
    }

    /// The internal index of a node's parent.
    pub fn parent_internal_of(&self, internal_index: usize) -> Option<usize> {
        self.internal_of(self.nodes[internal_index].parent_taxon_id)
    }

    /// The largest live taxon id.
    pub fn max_taxon_id(&self) -> TaxId {
        self.max_taxon_id
    }

    /// Number of merged aliases installed in the id table.
    pub fn merged_aliases(&self) -> usize {
        self.merged_aliases
    }
}
