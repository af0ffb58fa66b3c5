//! CLI command implementations

pub mod clade_counts;
pub mod classify;
pub mod info;
pub mod lca;
pub mod lineage;
pub mod ranks;

use std::io::Read;
use std::path::Path;

use crate::error::Result;

/// Read command input from a file, or from stdin when no path is given.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            Ok(content)
        },
    }
}
