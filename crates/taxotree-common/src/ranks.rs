//! Canonical taxonomic rank vocabulary
//!
//! The engine classifies taxa against a fixed, ordered set of ranks. The
//! vocabulary is ordered from most specific to most general: `forma` gets
//! index 1 and `superkingdom` index 28, so a **lower index always means a
//! more specific rank**. Ranks outside the vocabulary (including the
//! `no rank` / `no_rank` placeholders used throughout NCBI dumps) have no
//! index and are skipped by rank projections.
//!
//! A subset of ranks additionally carries a single-character short code
//! used when rendering lineages (`s_Homo sapiens;...`); ranks without a
//! code render as `-`.

use std::collections::HashMap;

use thiserror::Error;

/// A rank string appeared that is not part of the canonical vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid taxonomic rank '{0}'")]
pub struct UnknownRankError(pub String);

/// The canonical rank vocabulary, most specific first.
const NCBI_RANKS: [&str; 28] = [
    "forma",
    "varietas",
    "subspecies",
    "species",
    "species subgroup",
    "species group",
    "subgenus",
    "genus",
    "subtribe",
    "tribe",
    "subfamily",
    "family",
    "superfamily",
    "parvorder",
    "infraorder",
    "suborder",
    "order",
    "superorder",
    "infraclass",
    "subclass",
    "class",
    "superclass",
    "subphylum",
    "phylum",
    "superphylum",
    "subkingdom",
    "kingdom",
    "superkingdom",
];

/// Short codes for the ranks that appear in rendered lineages.
const NCBI_SHORT_RANKS: [(&str, char); 8] = [
    ("species", 's'),
    ("genus", 'g'),
    ("family", 'f'),
    ("order", 'o'),
    ("class", 'c'),
    ("phylum", 'p'),
    ("kingdom", 'k'),
    ("superkingdom", 'd'),
];

/// Short code returned for ranks without one of their own.
pub const NO_SHORT_RANK: char = '-';

/// The ordered rank vocabulary and its short-code mapping.
///
/// `Default` yields the NCBI vocabulary; custom vocabularies can be built
/// with [`RankConfig::new`] for taxonomies that use a different ladder.
#[derive(Debug, Clone)]
pub struct RankConfig {
    /// Ranks ordered most specific first; index in this vector + 1 is the
    /// canonical rank index.
    ranks: Vec<String>,
    /// Rank name to canonical index (1-based, lower = more specific)
    indices: HashMap<String, usize>,
    /// Rank name to single-character short code
    short_codes: HashMap<String, char>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self::new(
            NCBI_RANKS.iter().map(|r| r.to_string()).collect(),
            NCBI_SHORT_RANKS
                .iter()
                .map(|(r, c)| (r.to_string(), *c))
                .collect(),
        )
    }
}

impl RankConfig {
    /// Build a configuration from an ordered vocabulary (most specific
    /// first) and a short-code mapping.
    pub fn new(ranks: Vec<String>, short_codes: HashMap<String, char>) -> Self {
        let indices = ranks
            .iter()
            .enumerate()
            .map(|(i, r)| (r.clone(), i + 1))
            .collect();
        Self {
            ranks,
            indices,
            short_codes,
        }
    }

    /// The canonical index of a rank (1-based, lower = more specific),
    /// or `None` for ranks outside the vocabulary.
    pub fn rank_index(&self, rank: &str) -> Option<usize> {
        self.indices.get(rank).copied()
    }

    /// Whether the rank is part of the vocabulary.
    pub fn contains(&self, rank: &str) -> bool {
        self.indices.contains_key(rank)
    }

    /// The single-character short code of a rank, or [`NO_SHORT_RANK`].
    pub fn short_code(&self, rank: &str) -> char {
        self.short_codes.get(rank).copied().unwrap_or(NO_SHORT_RANK)
    }

    /// The vocabulary in canonical order, most specific first.
    pub fn ranks(&self) -> &[String] {
        &self.ranks
    }

    /// Validate a comma-separated rank list against the vocabulary.
    ///
    /// Returns the ranks in the order given, or the first rank that is not
    /// part of the vocabulary as an error.
    pub fn parse_ranks(&self, list: &str) -> Result<Vec<String>, UnknownRankError> {
        let mut result = Vec::new();
        for rank in list.split(',') {
            let rank = rank.trim();
            if rank.is_empty() {
                continue;
            }
            if !self.contains(rank) {
                return Err(UnknownRankError(rank.to_string()));
            }
            result.push(rank.to_string());
        }
        Ok(result)
    }
}
