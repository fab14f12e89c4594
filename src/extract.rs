// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Candidate-term extraction from free text.
//!
//! Feeds the mutation surface: a document gets flattened to lowercase
//! tokens, short tokens are dropped as noise, and the survivors come back
//! deduplicated in first-seen order, ready to become `Extracted` records.

use std::collections::HashSet;

use crate::vocabulary::{normalize_key, VocabularyIndex};

/// Tokens shorter than this are noise (articles, pronouns, markup scraps).
pub const MIN_TERM_CHARS: usize = 4;

/// Extract candidate vocabulary terms from free text.
///
/// Lowercases, treats every non-word character as a separator, drops
/// tokens under [`MIN_TERM_CHARS`], and deduplicates keeping the first
/// occurrence's position.
pub fn candidate_terms(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();

    let mut seen = HashSet::new();
    let mut terms = Vec::new();
    for token in cleaned.split_whitespace() {
        if token.chars().count() < MIN_TERM_CHARS {
            continue;
        }
        if seen.insert(token.to_string()) {
            terms.push(token.to_string());
        }
    }
    terms
}

/// Candidate terms not already present in the index.
pub fn new_terms(text: &str, index: &VocabularyIndex) -> Vec<String> {
    candidate_terms(text)
        .into_iter()
        .filter(|term| index.get(&normalize_key(term)).is_none())
        .collect()
}
