// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Length-bucket classification and context-driven suggestions.
//!
//! Words are coarsely grouped by character count - short (≤4), medium
//! (5-7), long (≥8) - and the buckets are scanned when a free-text context
//! asks "which vocabulary is related to this?". Relevance is substring
//! containment either way, or edit-distance similarity above a threshold.
//!
//! # Score merging
//!
//! When several context tokens hit the same word, the retained score is
//! decided by [`ScoreMerge`]. The historical behavior - and the default -
//! is `Overwrite`: the *last* token's score wins, even if an earlier token
//! scored higher. `Max` keeps the best score across tokens. Both are
//! supported so hosts can choose deliberately.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::similarity::similarity;
use crate::types::TermRecord;

// =============================================================================
// SCORING CONSTANTS
// =============================================================================

/// Weight of the similarity component in the relevance score.
pub const SIMILARITY_WEIGHT: f64 = 0.6;

/// Flat bonus when the record's definition contains the context token.
pub const DEFINITION_BONUS: f64 = 0.4;

/// Similarity above this makes a token/word pair relevant on its own.
pub const RELEVANCE_THRESHOLD: f64 = 0.6;

/// Upper character bound (inclusive) of the `Short` bucket.
pub const SHORT_MAX_CHARS: usize = 4;

/// Upper character bound (inclusive) of the `Medium` bucket.
pub const MEDIUM_MAX_CHARS: usize = 7;

/// Coarse word-length category. Every valid record lands in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthCategory {
    Short,
    Medium,
    Long,
}

impl LengthCategory {
    pub fn for_len(len: usize) -> Self {
        if len <= SHORT_MAX_CHARS {
            LengthCategory::Short
        } else if len <= MEDIUM_MAX_CHARS {
            LengthCategory::Medium
        } else {
            LengthCategory::Long
        }
    }

    pub fn for_word(word: &str) -> Self {
        Self::for_len(word.chars().count())
    }
}

/// How to combine scores when multiple context tokens hit the same word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreMerge {
    /// Later tokens replace earlier scores (historical behavior).
    #[default]
    Overwrite,
    /// Keep the best score seen across all tokens.
    Max,
}

/// Classifier over length buckets, rebuilt in full on every `categorize`.
#[derive(Default)]
pub struct ContextClassifier {
    buckets: HashMap<LengthCategory, Vec<Arc<TermRecord>>>,
    merge: ScoreMerge,
}

impl ContextClassifier {
    pub fn new() -> Self {
        Self::with_merge(ScoreMerge::default())
    }

    pub fn with_merge(merge: ScoreMerge) -> Self {
        ContextClassifier {
            buckets: HashMap::new(),
            merge,
        }
    }

    pub fn merge(&self) -> ScoreMerge {
        self.merge
    }

    /// Drop the old buckets and classify `records` from scratch.
    ///
    /// Records without a usable word are skipped silently, same policy as
    /// the index rebuild.
    pub fn categorize(&mut self, records: &[Arc<TermRecord>]) {
        self.buckets.clear();

        for record in records {
            if record.display_word.trim().is_empty() {
                continue;
            }
            self.buckets
                .entry(LengthCategory::for_word(&record.display_word))
                .or_default()
                .push(Arc::clone(record));
        }

        debug!(
            buckets = self.buckets.len(),
            words = self.buckets.values().map(Vec::len).sum::<usize>(),
            "vocabulary categorized"
        );
    }

    /// The records classified into `category`.
    pub fn bucket(&self, category: LengthCategory) -> &[Arc<TermRecord>] {
        self.buckets.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Suggest vocabulary related to a free-text context.
    ///
    /// The context is lowercased and split on whitespace; every token is
    /// tested against every bucketed word. Scores follow
    /// `similarity * 0.6 + 0.4 * (definition contains token)`, merged per
    /// word according to the configured [`ScoreMerge`], ranked descending.
    pub fn suggest_by_context(&self, context: &str, limit: usize) -> Vec<Arc<TermRecord>> {
        let context = context.to_lowercase();
        let mut best: HashMap<String, (Arc<TermRecord>, f64)> = HashMap::new();

        for token in context.split_whitespace() {
            for records in self.buckets.values() {
                for record in records {
                    let word = record.display_word.to_lowercase();
                    if !is_context_relevant(token, &word) {
                        continue;
                    }
                    let score = relevance_score(token, &word, record);
                    match self.merge {
                        ScoreMerge::Overwrite => {
                            best.insert(word, (Arc::clone(record), score));
                        }
                        ScoreMerge::Max => {
                            best.entry(word)
                                .and_modify(|slot| {
                                    if score > slot.1 {
                                        *slot = (Arc::clone(record), score);
                                    }
                                })
                                .or_insert_with(|| (Arc::clone(record), score));
                        }
                    }
                }
            }
        }

        let mut ranked: Vec<(Arc<TermRecord>, f64)> = best.into_values().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked.truncate(limit);
        ranked.into_iter().map(|(record, _)| record).collect()
    }
}

/// A word is relevant to a token when either contains the other, or they
/// sit above the similarity threshold.
fn is_context_relevant(token: &str, word: &str) -> bool {
    word.contains(token) || token.contains(word) || similarity(token, word) > RELEVANCE_THRESHOLD
}

fn relevance_score(token: &str, word: &str, record: &TermRecord) -> f64 {
    let mut score = similarity(token, word) * SIMILARITY_WEIGHT;
    if let Some(definition) = record.definition.as_deref() {
        if definition.to_lowercase().contains(token) {
            score += DEFINITION_BONUS;
        }
    }
    score
}
