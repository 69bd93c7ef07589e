//! Parser module: declared metadata and computed values from a values file.

pub mod comments;
pub mod merge;
pub mod path;
pub mod values;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::Parameter;
use std::fs;
use std::path::Path;

/// Read a file, tagging failures with its path.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Declared records from the tag comments of a values file.
pub fn parse_metadata_file(path: &Path, config: &Config) -> Result<Vec<Parameter>> {
    let content = read_source(path)?;
    comments::parse(&content, config)
}

/// Computed records from the YAML body of a values file.
pub fn parse_values_file(path: &Path) -> Result<Vec<Parameter>> {
    let content = read_source(path)?;
    values::parse(&content).map_err(|source| Error::Yaml {
        path: path.to_path_buf(),
        source,
    })
}
