//! Test utilities shared across the integration and property suites.

#![allow(dead_code)]

use lexica::{TermRecord, TermSource};

/// Create a bare mock record for a word.
pub fn make_record(word: &str) -> TermRecord {
    TermRecord::new(word, TermSource::Mock)
}

/// Create a mock record with a definition.
pub fn make_record_with_definition(word: &str, definition: &str) -> TermRecord {
    TermRecord::new(word, TermSource::Mock).with_definition(definition)
}

/// Build records for a whole word list at once.
pub fn make_records(words: &[&str]) -> Vec<TermRecord> {
    words.iter().map(|word| make_record(word)).collect()
}
