// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The owning facade over the index and the classifier.
//!
//! Hosts construct one engine, feed it bulk term lists, and query it. The
//! one piece of coordination that matters lives here: a rebuild populates
//! the index and hands the *same* accepted records to the classifier, so
//! both views describe one vocabulary.
//!
//! No singleton, no hidden globals - the host controls construction and
//! disposal. Single inserts and removes only touch the index; buckets are
//! refreshed on the next rebuild. Hosts that persist their vocabulary
//! reload after every store change anyway, so the buckets never lag long.

use std::sync::Arc;

use crate::classifier::{ContextClassifier, ScoreMerge};
use crate::types::{IndexStats, SearchOptions, SearchOutcome, TermRecord};
use crate::vocabulary::VocabularyIndex;

/// Vocabulary engine: index + classifier behind one lifecycle.
#[derive(Default)]
pub struct VocabularyEngine {
    index: VocabularyIndex,
    classifier: ContextClassifier,
}

impl VocabularyEngine {
    pub fn new() -> Self {
        VocabularyEngine {
            index: VocabularyIndex::new(),
            classifier: ContextClassifier::new(),
        }
    }

    /// An engine whose context suggestions merge scores with `merge`.
    pub fn with_score_merge(merge: ScoreMerge) -> Self {
        VocabularyEngine {
            index: VocabularyIndex::new(),
            classifier: ContextClassifier::with_merge(merge),
        }
    }

    /// Full replace: rebuild the index and re-categorize from the same
    /// accepted records.
    pub fn rebuild(&mut self, records: Vec<TermRecord>) {
        let accepted = self.index.rebuild(records);
        self.classifier.categorize(&accepted);
    }

    pub fn search(&self, term: &str, options: SearchOptions) -> SearchOutcome {
        self.index.search(term, options)
    }

    pub fn suggest_similar(&self, term: &str, limit: usize) -> Vec<Arc<TermRecord>> {
        self.index.suggest_similar(term, limit)
    }

    pub fn suggest_by_context(&self, context: &str, limit: usize) -> Vec<Arc<TermRecord>> {
        self.classifier.suggest_by_context(context, limit)
    }

    pub fn insert(&mut self, record: TermRecord) -> bool {
        self.index.insert(record)
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.index.remove(key)
    }

    pub fn update(&mut self, key: &str, record: TermRecord) -> bool {
        self.index.update(key, record)
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    pub fn index(&self) -> &VocabularyIndex {
        &self.index
    }

    pub fn classifier(&self) -> &ContextClassifier {
        &self.classifier
    }
}
