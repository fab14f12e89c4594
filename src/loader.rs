// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reading and writing the JSON term list.
//!
//! This is the boundary between the pure engine and the outside world: the
//! host loads a term file here, hands the records to
//! [`crate::VocabularyEngine::rebuild`], and saves the file back after
//! store-changing operations. The engine itself never touches a file.
//!
//! A missing terms file is an empty vocabulary, not an error - first runs
//! start from nothing.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::types::TermRecord;

/// Failure while reading or writing a term file.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "term file io error: {err}"),
            LoadError::Parse(err) => write!(f, "term file is not a valid term list: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err)
    }
}

/// Load a JSON array of term records. Missing file → empty list.
pub fn load_terms(path: &Path) -> Result<Vec<TermRecord>, LoadError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Write the term list back, pretty-printed for hand editing.
pub fn save_terms(path: &Path, records: &[TermRecord]) -> Result<(), LoadError> {
    let serialized = serde_json::to_string_pretty(records)?;
    fs::write(path, serialized)?;
    Ok(())
}
