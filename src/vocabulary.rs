// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The vocabulary index: ordered prefix lookup plus an exact-match table.
//!
//! Two structures over one record set. The AVL tree answers prefix queries;
//! the hash table answers exact lookups in O(1). Both hold the same `Arc`
//! per key, so their key sets never drift and a record updated through one
//! path is what the other path returns.
//!
//! Mutations (`rebuild`, `insert`, `remove`, `update`) touch both structures
//! together. Reads never mutate. A host that wants to interleave the two
//! from multiple threads must serialize them itself - the index is a plain
//! synchronous component with no interior locking.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::ordered::OrderedIndex;
use crate::similarity::similarity;
use crate::types::{IndexStats, SearchOptions, SearchOutcome, TermRecord};

/// Derive the lookup key for a display word: trimmed, lowercased.
pub fn normalize_key(word: &str) -> String {
    word.trim().to_lowercase()
}

/// In-memory vocabulary index over shared term records.
#[derive(Default)]
pub struct VocabularyIndex {
    exact: HashMap<String, Arc<TermRecord>>,
    ordered: OrderedIndex,
    indexed: bool,
}

impl VocabularyIndex {
    pub fn new() -> Self {
        VocabularyIndex {
            exact: HashMap::new(),
            ordered: OrderedIndex::new(),
            indexed: false,
        }
    }

    /// Replace the whole index with a fresh build over `records`.
    ///
    /// Records whose display word trims to nothing are skipped silently -
    /// bulk loads from noisy sources should not abort. When two records
    /// derive the same key, the first one wins and the rest are dropped.
    ///
    /// Returns the accepted, keyed, shared records so the owner can hand
    /// the same instances to the classifier.
    pub fn rebuild(&mut self, records: Vec<TermRecord>) -> Vec<Arc<TermRecord>> {
        self.exact.clear();
        self.ordered.clear();

        let mut accepted = Vec::with_capacity(records.len());
        for mut record in records {
            let key = normalize_key(&record.display_word);
            if key.is_empty() {
                continue;
            }
            record.key = key;
            let record = Arc::new(record);
            if self.ordered.insert(&record.key, Arc::clone(&record)) {
                self.exact.insert(record.key.clone(), Arc::clone(&record));
                accepted.push(record);
            }
        }

        self.indexed = true;
        debug!(
            words = accepted.len(),
            height = self.ordered.height(),
            "vocabulary index rebuilt"
        );
        accepted
    }

    /// Look a term up by exact key or by prefix.
    ///
    /// With `include_definitions`, records whose definition contains the
    /// term (case-insensitively) are appended after the prefix matches,
    /// deduplicated by key in first-seen order.
    ///
    /// Before the first rebuild this returns an empty, `NotIndexed`-flagged
    /// outcome instead of failing.
    pub fn search(&self, term: &str, options: SearchOptions) -> SearchOutcome {
        if !self.indexed {
            warn!("search before rebuild; returning empty result");
            return SearchOutcome::unindexed();
        }

        let needle = normalize_key(term);

        if options.exact {
            let records = self
                .exact
                .get(&needle)
                .map(|record| vec![Arc::clone(record)])
                .unwrap_or_default();
            return SearchOutcome::ready(records);
        }

        let mut records = self.ordered.search_prefix(&needle);

        if options.include_definitions {
            let mut seen: HashSet<String> =
                records.iter().map(|record| record.key.clone()).collect();
            for record in self.exact.values() {
                let Some(definition) = record.definition.as_deref() else {
                    continue;
                };
                if definition.to_lowercase().contains(&needle) && seen.insert(record.key.clone()) {
                    records.push(Arc::clone(record));
                }
            }
        }

        SearchOutcome::ready(records)
    }

    /// Rank near misses for a possibly misspelled term.
    ///
    /// Candidates are the keys extending the term as a prefix, minus the
    /// term itself. A typo in the first letters leaves that set empty, so
    /// when no key extends the term at all the whole vocabulary is ranked
    /// instead - "aglorithm" still finds "algorithm". Ordering is by
    /// descending similarity; ties keep collection order (the sort is
    /// stable).
    pub fn suggest_similar(&self, term: &str, limit: usize) -> Vec<Arc<TermRecord>> {
        if !self.indexed {
            return Vec::new();
        }

        let needle = normalize_key(term);
        let prefixed = self.ordered.search_prefix(&needle);
        let candidates: Vec<Arc<TermRecord>> = if prefixed.is_empty() {
            // No key starts with the needle, so none can equal it either.
            self.exact.values().map(Arc::clone).collect()
        } else {
            prefixed
                .into_iter()
                .filter(|record| record.key != needle)
                .collect()
        };

        let mut ranked: Vec<(Arc<TermRecord>, f64)> = candidates
            .into_iter()
            .map(|record| {
                let score = similarity(&needle, &record.key);
                (record, score)
            })
            .collect();

        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked.truncate(limit);
        ranked.into_iter().map(|(record, _)| record).collect()
    }

    /// Add a single term between rebuilds. No-op (returning `false`) when
    /// the derived key is empty or already present.
    pub fn insert(&mut self, record: TermRecord) -> bool {
        let key = normalize_key(&record.display_word);
        if key.is_empty() {
            return false;
        }

        let mut record = record;
        record.key = key;
        let record = Arc::new(record);
        let inserted = self.ordered.insert(&record.key, Arc::clone(&record));
        if inserted {
            debug!(key = %record.key, "term inserted");
            self.exact.insert(record.key.clone(), record);
        }
        inserted
    }

    /// Remove a term by key (normalized first). Returns whether it existed.
    pub fn remove(&mut self, key: &str) -> bool {
        let needle = normalize_key(key);
        let removed = self.ordered.remove(&needle);
        if removed {
            debug!(key = %needle, "term removed");
            self.exact.remove(&needle);
        }
        removed
    }

    /// Replace a term: remove the old key, insert the new record.
    ///
    /// Spelled out as remove-then-insert because a plain insert keeps the
    /// existing record on key collision.
    pub fn update(&mut self, key: &str, record: TermRecord) -> bool {
        self.remove(key);
        self.insert(record)
    }

    /// Exact lookup without going through [`search`](Self::search).
    pub fn get(&self, key: &str) -> Option<&Arc<TermRecord>> {
        self.exact.get(&normalize_key(key))
    }

    /// Iterate over every indexed record, no particular order.
    pub fn records(&self) -> impl Iterator<Item = &Arc<TermRecord>> {
        self.exact.values()
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    /// Diagnostic counters, including the two-bytes-per-character size
    /// heuristic over keys and JSON-serialized records.
    pub fn stats(&self) -> IndexStats {
        let estimated_size_bytes = self
            .exact
            .iter()
            .map(|(key, record)| {
                let serialized = serde_json::to_string(record.as_ref())
                    .map(|json| json.chars().count())
                    .unwrap_or(0);
                2 * key.chars().count() + 2 * serialized
            })
            .sum();

        IndexStats {
            total_words: self.exact.len(),
            indexed: self.indexed,
            tree_height: self.ordered.height(),
            estimated_size_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TermSource;

    fn record(word: &str) -> TermRecord {
        TermRecord::new(word, TermSource::Mock)
    }

    fn record_with_definition(word: &str, definition: &str) -> TermRecord {
        record(word).with_definition(definition)
    }

    fn built(records: Vec<TermRecord>) -> VocabularyIndex {
        let mut index = VocabularyIndex::new();
        index.rebuild(records);
        index
    }

    #[test]
    fn search_before_rebuild_reports_unindexed() {
        let index = VocabularyIndex::new();
        let outcome = index.search("cat", SearchOptions::default());
        assert!(!outcome.is_indexed());
        assert!(outcome.records.is_empty());
        assert!(index.suggest_similar("cat", 5).is_empty());
    }

    #[test]
    fn rebuild_skips_records_without_a_word() {
        let index = built(vec![record("cat"), record(""), record("   ")]);
        assert_eq!(index.len(), 1);
        assert!(index.is_indexed());
    }

    #[test]
    fn rebuild_normalizes_keys_and_keeps_display_casing() {
        let index = built(vec![record("  Algorithm ")]);
        let found = index.get("ALGORITHM").expect("keyed by lowercase");
        assert_eq!(found.key, "algorithm");
        assert_eq!(found.display_word, "  Algorithm ");
    }

    #[test]
    fn duplicate_keys_keep_the_first_record() {
        let index = built(vec![
            record_with_definition("cat", "first"),
            record_with_definition("CAT", "second"),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(
            index.get("cat").unwrap().definition.as_deref(),
            Some("first")
        );
    }

    #[test]
    fn exact_search_returns_at_most_one_record() {
        let index = built(vec![record("cat"), record("catalog")]);
        let outcome = index.search(
            "cat",
            SearchOptions {
                exact: true,
                ..SearchOptions::default()
            },
        );
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].key, "cat");

        let missing = index.search(
            "dog",
            SearchOptions {
                exact: true,
                ..SearchOptions::default()
            },
        );
        assert!(missing.records.is_empty());
        assert!(missing.is_indexed());
    }

    #[test]
    fn prefix_search_matches_the_expected_set() {
        let index = built(vec![record("cat"), record("car"), record("cow")]);
        let outcome = index.search("ca", SearchOptions::default());
        let mut keys: Vec<&str> = outcome.records.iter().map(|r| r.key.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["car", "cat"]);
    }

    #[test]
    fn definition_matches_append_after_prefix_matches() {
        let index = built(vec![
            record("cat"),
            record_with_definition("catalog", "an ordered list"),
            record_with_definition("dog", "chases every cat it sees"),
        ]);

        let outcome = index.search(
            "cat",
            SearchOptions {
                exact: false,
                include_definitions: true,
            },
        );
        let keys: Vec<&str> = outcome.records.iter().map(|r| r.key.as_str()).collect();

        // Prefix hits lead; the definition hit trails; nothing is repeated.
        assert_eq!(keys.len(), 3);
        assert!(keys[..2].contains(&"cat"));
        assert!(keys[..2].contains(&"catalog"));
        assert_eq!(keys[2], "dog");
    }

    #[test]
    fn definition_match_is_case_insensitive() {
        let index = built(vec![record_with_definition("dog", "A loyal ANIMAL")]);
        let outcome = index.search(
            "animal",
            SearchOptions {
                exact: false,
                include_definitions: true,
            },
        );
        assert_eq!(outcome.records.len(), 1);
    }

    #[test]
    fn no_match_anywhere_yields_an_empty_ready_outcome() {
        let index = built(vec![record_with_definition("cat", "a small feline")]);
        let outcome = index.search(
            "xyz",
            SearchOptions {
                exact: false,
                include_definitions: true,
            },
        );
        assert!(outcome.is_indexed());
        assert!(outcome.records.is_empty());
    }

    #[test]
    fn suggest_similar_ranks_by_similarity() {
        let index = built(vec![
            record("algorithm"),
            record("algorithms"),
            record("algebra"),
        ]);
        let suggestions = index.suggest_similar("alg", 10);
        // "alg" itself is not indexed, so every prefix match is a candidate;
        // shorter keys sit closer to the three-letter needle.
        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0].key, "algebra");
    }

    #[test]
    fn suggest_similar_excludes_the_term_itself_and_honors_limit() {
        let index = built(vec![record("car"), record("cart"), record("carton")]);
        let suggestions = index.suggest_similar("car", 1);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].key, "cart");
    }

    #[test]
    fn suggest_similar_falls_back_when_no_key_extends_the_term() {
        let index = built(vec![record("algorithm"), record("database")]);
        let suggestions = index.suggest_similar("aglorithm", 1);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].key, "algorithm");
    }

    #[test]
    fn insert_remove_update_keep_both_structures_in_lockstep() {
        let mut index = built(vec![record("cat")]);

        assert!(index.insert(record("dog")));
        assert!(!index.insert(record("dog")));
        assert_eq!(index.len(), 2);
        assert_eq!(index.search("dog", SearchOptions::default()).records.len(), 1);

        assert!(index.update("cat", record_with_definition("cat", "updated")));
        assert_eq!(
            index.get("cat").unwrap().definition.as_deref(),
            Some("updated")
        );
        let via_prefix = index.search("cat", SearchOptions::default());
        assert_eq!(via_prefix.records[0].definition.as_deref(), Some("updated"));

        assert!(index.remove("dog"));
        assert!(!index.remove("dog"));
        assert!(index.search("dog", SearchOptions::default()).records.is_empty());
        assert!(index.get("dog").is_none());
    }

    #[test]
    fn stats_reflect_the_index_contents() {
        let mut index = VocabularyIndex::new();
        let empty = index.stats();
        assert_eq!(empty.total_words, 0);
        assert!(!empty.indexed);
        assert_eq!(empty.tree_height, 0);
        assert_eq!(empty.estimated_size_bytes, 0);

        index.rebuild(vec![record("cat"), record("catalog")]);
        let stats = index.stats();
        assert_eq!(stats.total_words, 2);
        assert!(stats.indexed);
        assert!(stats.tree_height >= 1);
        assert!(stats.estimated_size_bytes > 0);
    }
}
