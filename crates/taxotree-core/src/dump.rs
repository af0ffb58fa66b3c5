//! NCBI taxdump discovery and parsing
//!
//! The three dump files (`nodes.dmp`, `names.dmp`, `merged.dmp`) are
//! line-oriented with the literal three-byte field separator `\t|\t`;
//! lines may end with a trailing `\t|` marker, which is tolerated and
//! stripped. All parse failures carry the file and line number of the
//! offending row.
//!
//! # Row formats
//!
//! ```text
//! nodes.dmp:  taxon_id \t|\t parent_taxon_id \t|\t rank \t|
//! names.dmp:  taxon_id \t|\t name \t|\t unique_name \t|\t name_class \t|
//! merged.dmp: old_taxon_id \t|\t new_taxon_id \t|
//! ```

use std::path::{Path, PathBuf};

use crate::error::{Result, TaxonomyError};
use crate::store::{NameRecord, NodeRecord, TaxId};

/// The literal field separator used by all dump files.
pub const FIELD_SEPARATOR: &str = "\t|\t";

/// Name rows are retained only when their class field contains this.
const SCIENTIFIC_NAME_CLASS: &str = "scientific name";

/// The resolved locations of the three dump files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxdumpFiles {
    pub nodes: PathBuf,
    pub names: PathBuf,
    pub merged: PathBuf,
}

impl TaxdumpFiles {
    /// Use explicit paths for the three dump files.
    pub fn new(
        nodes: impl Into<PathBuf>,
        names: impl Into<PathBuf>,
        merged: impl Into<PathBuf>,
    ) -> Self {
        Self {
            nodes: nodes.into(),
            names: names.into(),
            merged: merged.into(),
        }
    }

    /// Locate the dump files for a database prefix.
    ///
    /// Looks for `<prefix>_nodes.dmp`, `<prefix>_names.dmp` and
    /// `<prefix>_merged.dmp`; when any of those is missing, falls back to
    /// bare `nodes.dmp` / `names.dmp` / `merged.dmp` in the working
    /// directory. Fails when neither set is complete.
    pub fn discover(prefix: &str) -> Result<Self> {
        let prefixed = Self::new(
            format!("{prefix}_nodes.dmp"),
            format!("{prefix}_names.dmp"),
            format!("{prefix}_merged.dmp"),
        );
        if prefixed.all_exist() {
            return Ok(prefixed);
        }

        let bare = Self::new("nodes.dmp", "names.dmp", "merged.dmp");
        if bare.all_exist() {
            return Ok(bare);
        }

        Err(TaxonomyError::DumpNotFound {
            prefix: prefix.to_string(),
        })
    }

    fn all_exist(&self) -> bool {
        self.nodes.is_file() && self.names.is_file() && self.merged.is_file()
    }
}

/// Read one dump file into memory, attaching the path to any I/O error.
pub(crate) fn read_dump(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|source| TaxonomyError::read_file(path.display().to_string(), source))
}

/// Split a dump row on the `\t|\t` separator, stripping the trailing
/// `\t|` end-of-record marker when present.
fn split_fields(line: &str) -> Vec<&str> {
    line.split(FIELD_SEPARATOR)
        .map(|field| field.trim().trim_end_matches('|').trim())
        .collect()
}

fn parse_tax_id(field: &str, file: &str, line: usize) -> Result<TaxId> {
    field
        .parse::<TaxId>()
        .map_err(|_| TaxonomyError::format(file, line, format!("invalid taxon id '{field}'")))
}

/// Parse the nodes dump into raw records.
///
/// Columns: taxon id, parent taxon id, rank. Empty lines are skipped;
/// short or non-numeric rows are fatal.
pub fn parse_nodes(content: &str, file: &str) -> Result<Vec<NodeRecord>> {
    let mut records = Vec::new();
    for (line_index, line) in content.lines().enumerate() {
        let line_num = line_index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_fields(line);
        if fields.len() < 3 {
            return Err(TaxonomyError::format(
                file,
                line_num,
                format!("expected at least 3 fields, got {}", fields.len()),
            ));
        }
        let taxon_id = parse_tax_id(fields[0], file, line_num)?;
        if taxon_id < 1 {
            return Err(TaxonomyError::format(
                file,
                line_num,
                format!("taxon id {taxon_id} out of domain (must be >= 1)"),
            ));
        }
        let parent_taxon_id = parse_tax_id(fields[1], file, line_num)?;
        records.push(NodeRecord {
            taxon_id,
            parent_taxon_id,
            rank: fields[2].to_string(),
        });
    }
    Ok(records)
}

/// Parse the names dump, retaining only scientific names.
///
/// Columns: taxon id, name, unique name, name class. Rows whose class
/// field does not contain `scientific name` are skipped; rows with fewer
/// than 4 fields are fatal.
pub fn parse_names(content: &str, file: &str) -> Result<Vec<NameRecord>> {
    let mut records = Vec::new();
    for (line_index, line) in content.lines().enumerate() {
        let line_num = line_index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_fields(line);
        if fields.len() < 4 {
            return Err(TaxonomyError::format(
                file,
                line_num,
                format!("expected at least 4 fields, got {}", fields.len()),
            ));
        }
        if !fields[3].contains(SCIENTIFIC_NAME_CLASS) {
            continue;
        }
        records.push(NameRecord {
            taxon_id: parse_tax_id(fields[0], file, line_num)?,
            name: fields[1].to_string(),
        });
    }
    Ok(records)
}

/// Parse the merged dump into `(old id, new id)` pairs.
pub fn parse_merged(content: &str, file: &str) -> Result<Vec<(TaxId, TaxId)>> {
    let mut pairs = Vec::new();
    for (line_index, line) in content.lines().enumerate() {
        let line_num = line_index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_fields(line);
        if fields.len() < 2 {
            return Err(TaxonomyError::format(
                file,
                line_num,
                format!("expected at least 2 fields, got {}", fields.len()),
            ));
        }
        pairs.push((
            parse_tax_id(fields[0], file, line_num)?,
            parse_tax_id(fields[1], file, line_num)?,
        ));
    }
    Ok(pairs)
}
