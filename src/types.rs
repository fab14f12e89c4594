// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a vocabulary index.
//!
//! Everything the engine stores or returns is defined here. A `TermRecord` is
//! the canonical unit of vocabulary data; the index structures share records
//! via `Arc` so an update made through one lookup path is visible from every
//! other path.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **TermRecord.key**: lowercase, trimmed, derived from `display_word`.
//!   The key is filled in by the index when a record is accepted; a record
//!   whose display word trims to the empty string is never indexed.
//! - **Key lockstep**: the ordered index and the exact table always hold the
//!   same key set, and for a given key they hold the *same* `Arc` instance.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a term came from.
///
/// `Extracted` terms were pulled out of free text by [`crate::extract`];
/// `Mock` marks fixture data used in demos and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermSource {
    #[default]
    Manual,
    Extracted,
    Mock,
}

/// The canonical unit of vocabulary data: a word, its meaning, and metadata.
///
/// The wire format is camelCase JSON. `word` and `meaning` are accepted as
/// input aliases for `displayWord` and `definition`, matching the term files
/// the loader has historically consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermRecord {
    /// Normalized lookup key. Derived from `display_word` at index time;
    /// empty on records that have not been through the index yet.
    #[serde(default)]
    pub key: String,

    /// The word as entered, casing preserved for display.
    #[serde(alias = "word")]
    pub display_word: String,

    /// Meaning of the word, if known.
    #[serde(default, alias = "meaning")]
    pub definition: Option<String>,

    /// Example sentence using the word.
    #[serde(default)]
    pub example: Option<String>,

    #[serde(default)]
    pub source: TermSource,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TermRecord {
    /// Create a bare record for a word. Key derivation happens at index time.
    pub fn new(display_word: impl Into<String>, source: TermSource) -> Self {
        TermRecord {
            key: String::new(),
            display_word: display_word.into(),
            definition: None,
            example: None,
            source,
            created_at: None,
        }
    }

    /// Attach a definition, builder-style.
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }
}

/// Knobs for [`crate::VocabularyIndex::search`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    /// Return only the exact-key match instead of prefix matches.
    pub exact: bool,
    /// Also match records whose definition contains the term.
    pub include_definitions: bool,
}

/// Whether the index had been built when a query ran.
///
/// Querying before the first rebuild is not an error - it returns an empty
/// result flagged `NotIndexed` so the caller can tell "nothing matched" from
/// "nothing was loaded".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStatus {
    Ready,
    NotIndexed,
}

/// A search result set plus the index status it was produced under.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub status: IndexStatus,
    pub records: Vec<Arc<TermRecord>>,
}

impl SearchOutcome {
    pub(crate) fn unindexed() -> Self {
        SearchOutcome {
            status: IndexStatus::NotIndexed,
            records: Vec::new(),
        }
    }

    pub(crate) fn ready(records: Vec<Arc<TermRecord>>) -> Self {
        SearchOutcome {
            status: IndexStatus::Ready,
            records,
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.status == IndexStatus::Ready
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Diagnostic counters for the index.
///
/// `estimated_size_bytes` is a two-bytes-per-character heuristic over keys
/// and serialized records - useful for a status line, not a memory bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub total_words: usize,
    pub indexed: bool,
    pub tree_height: usize,
    pub estimated_size_bytes: usize,
}
