// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The ordered index: an AVL tree keyed by normalized word.
//!
//! Prefix queries need the keys in lexicographic order, and single-word
//! inserts arrive interleaved with queries, so a self-balancing tree beats
//! a sorted vector here. Heights stay within one of each other at every
//! node, which keeps recursion depth at O(log n) for every operation.
//!
//! # Invariants
//!
//! - **BST order**: all left-descendant keys < `node.key` < all
//!   right-descendant keys, by byte-wise string comparison.
//! - **Height law**: `node.height = 1 + max(height(left), height(right))`,
//!   with the empty subtree at height 0.
//! - **Balance**: `height(left) - height(right) ∈ {-1, 0, 1}` after every
//!   insert and remove.
//! - **First write wins**: inserting an existing key is a no-op that keeps
//!   the stored record. Updates go through remove-then-insert upstream.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::types::TermRecord;

struct Node {
    key: String,
    record: Arc<TermRecord>,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
    height: usize,
}

impl Node {
    fn new(key: String, record: Arc<TermRecord>) -> Self {
        Node {
            key,
            record,
            left: None,
            right: None,
            height: 1,
        }
    }

    fn update_height(&mut self) {
        self.height = 1 + height_of(&self.left).max(height_of(&self.right));
    }

    fn balance(&self) -> isize {
        height_of(&self.left) as isize - height_of(&self.right) as isize
    }
}

fn height_of(node: &Option<Box<Node>>) -> usize {
    node.as_ref().map_or(0, |n| n.height)
}

fn balance_of(node: &Option<Box<Node>>) -> isize {
    node.as_ref().map_or(0, |n| n.balance())
}

/// Rotate right around `y`: the left child becomes the subtree root.
///
/// Exactly two ownership edges move, and the two involved heights are
/// recomputed demoted-node-first. A `y` with no left child is returned
/// unchanged - the rebalance cases never produce that call, but the
/// function stays total.
fn rotate_right(mut y: Box<Node>) -> Box<Node> {
    let Some(mut x) = y.left.take() else { return y };
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

/// Rotate left around `x`: the right child becomes the subtree root.
fn rotate_left(mut x: Box<Node>) -> Box<Node> {
    let Some(mut y) = x.right.take() else { return x };
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

fn insert_node(
    node: Option<Box<Node>>,
    key: &str,
    record: &Arc<TermRecord>,
    inserted: &mut bool,
) -> Box<Node> {
    let mut node = match node {
        None => {
            *inserted = true;
            return Box::new(Node::new(key.to_string(), Arc::clone(record)));
        }
        Some(node) => node,
    };

    match key.cmp(node.key.as_str()) {
        Ordering::Less => node.left = Some(insert_node(node.left.take(), key, record, inserted)),
        Ordering::Greater => {
            node.right = Some(insert_node(node.right.take(), key, record, inserted));
        }
        // Duplicate key: keep the record that is already stored.
        Ordering::Equal => return node,
    }

    node.update_height();
    let balance = node.balance();

    // Four rebalance cases, selected by the balance factor and where the new
    // key landed relative to the near child.
    if balance > 1 {
        let left_key = node.left.as_deref().map_or("", |n| n.key.as_str());
        if key < left_key {
            return rotate_right(node);
        }
        if key > left_key {
            node.left = node.left.take().map(rotate_left);
            return rotate_right(node);
        }
    }
    if balance < -1 {
        let right_key = node.right.as_deref().map_or("", |n| n.key.as_str());
        if key > right_key {
            return rotate_left(node);
        }
        if key < right_key {
            node.right = node.right.take().map(rotate_right);
            return rotate_left(node);
        }
    }

    node
}

fn remove_node(node: Option<Box<Node>>, key: &str, removed: &mut bool) -> Option<Box<Node>> {
    let mut node = node?;

    match key.cmp(node.key.as_str()) {
        Ordering::Less => node.left = remove_node(node.left.take(), key, removed),
        Ordering::Greater => node.right = remove_node(node.right.take(), key, removed),
        Ordering::Equal => {
            *removed = true;
            match (node.left.take(), node.right.take()) {
                (None, right) => return right,
                (left, None) => return left,
                (left, Some(right)) => {
                    // Two children: the in-order successor takes this slot,
                    // then gets removed from the right subtree.
                    let (successor_key, successor_record) = min_entry(&right);
                    node.record = successor_record;
                    node.left = left;
                    let mut successor_removed = false;
                    node.right = remove_node(Some(right), &successor_key, &mut successor_removed);
                    node.key = successor_key;
                }
            }
        }
    }

    node.update_height();
    let balance = node.balance();

    // Delete-side rebalancing looks at the child's balance factor, not at
    // the removed key.
    if balance > 1 {
        if balance_of(&node.left) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return Some(rotate_right(node));
    }
    if balance < -1 {
        if balance_of(&node.right) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return Some(rotate_left(node));
    }

    Some(node)
}

fn min_entry(node: &Node) -> (String, Arc<TermRecord>) {
    let mut current = node;
    while let Some(left) = current.left.as_deref() {
        current = left;
    }
    (current.key.clone(), Arc::clone(&current.record))
}

fn collect_prefix(node: &Node, prefix: &str, out: &mut Vec<Arc<TermRecord>>) {
    let extends = node.key.starts_with(prefix);
    if extends {
        out.push(Arc::clone(&node.record));
    }

    // Every key extending the prefix sits in the range [prefix, prefix⁺).
    // Left subtrees can only hold matches when the prefix is not greater
    // than this key. Right subtrees can hold matches when the prefix is not
    // smaller than this key OR when this key itself extends the prefix -
    // in that case longer matches sort after it.
    if prefix <= node.key.as_str() {
        if let Some(left) = node.left.as_deref() {
            collect_prefix(left, prefix, out);
        }
    }
    if extends || prefix >= node.key.as_str() {
        if let Some(right) = node.right.as_deref() {
            collect_prefix(right, prefix, out);
        }
    }
}

/// Self-balancing ordered index over normalized word keys.
///
/// Each node shares its `TermRecord` with the exact-lookup table, so both
/// structures observe the same instance.
#[derive(Default)]
pub struct OrderedIndex {
    root: Option<Box<Node>>,
    len: usize,
}

impl OrderedIndex {
    pub fn new() -> Self {
        OrderedIndex { root: None, len: 0 }
    }

    /// Insert a key with its record. Returns `false` (and changes nothing)
    /// when the key is already present.
    pub fn insert(&mut self, key: &str, record: Arc<TermRecord>) -> bool {
        let mut inserted = false;
        self.root = Some(insert_node(self.root.take(), key, &record, &mut inserted));
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Remove a key. Returns `false` when the key was not present.
    pub fn remove(&mut self, key: &str) -> bool {
        let mut removed = false;
        self.root = remove_node(self.root.take(), key, &mut removed);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// All records whose key starts with `prefix` (lowercased first).
    ///
    /// The traversal prunes subtrees the prefix cannot reach, but result
    /// order is whatever the descent produced - callers that need a ranking
    /// sort explicitly.
    pub fn search_prefix(&self, prefix: &str) -> Vec<Arc<TermRecord>> {
        let prefix = prefix.to_lowercase();
        let mut results = Vec::new();
        if let Some(root) = self.root.as_deref() {
            collect_prefix(root, &prefix, &mut results);
        }
        results
    }

    /// Height of the tree; 0 when empty.
    pub fn height(&self) -> usize {
        height_of(&self.root)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop the root, releasing the whole subtree.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// All keys in ascending order. Sortedness of this listing is exactly
    /// the BST invariant, which makes it the tool the test suites reach for.
    pub fn keys(&self) -> Vec<String> {
        fn walk(node: &Node, out: &mut Vec<String>) {
            if let Some(left) = node.left.as_deref() {
                walk(left, out);
            }
            out.push(node.key.clone());
            if let Some(right) = node.right.as_deref() {
                walk(right, out);
            }
        }

        let mut keys = Vec::with_capacity(self.len);
        if let Some(root) = self.root.as_deref() {
            walk(root, &mut keys);
        }
        keys
    }

    /// Verify the height law and the balance bound at every node.
    ///
    /// Recomputes heights bottom-up instead of trusting the stored ones.
    /// Diagnostic - the operations maintain this on their own.
    pub fn is_balanced(&self) -> bool {
        fn check(node: &Node) -> Option<usize> {
            let left = match node.left.as_deref() {
                Some(child) => check(child)?,
                None => 0,
            };
            let right = match node.right.as_deref() {
                Some(child) => check(child)?,
                None => 0,
            };
            let height = 1 + left.max(right);
            let diff = left as isize - right as isize;
            if node.height == height && (-1..=1).contains(&diff) {
                Some(height)
            } else {
                None
            }
        }

        match self.root.as_deref() {
            Some(root) => check(root).is_some(),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TermSource;

    fn record(word: &str) -> Arc<TermRecord> {
        let mut record = TermRecord::new(word, TermSource::Mock);
        record.key = word.to_lowercase();
        Arc::new(record)
    }

    fn index_of(words: &[&str]) -> OrderedIndex {
        let mut index = OrderedIndex::new();
        for word in words {
            index.insert(word, record(word));
        }
        index
    }

    #[test]
    fn empty_tree_has_height_zero() {
        assert_eq!(OrderedIndex::new().height(), 0);
    }

    #[test]
    fn single_key_tree_is_balanced_at_height_one() {
        let index = index_of(&["cat"]);
        assert_eq!(index.height(), 1);
        assert!(index.is_balanced());
    }

    #[test]
    fn five_inserts_stay_within_height_three() {
        let index = index_of(&["cat", "car", "dog", "bird", "ant"]);
        assert!(index.height() <= 3);
        assert!(index.is_balanced());
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn ascending_inserts_trigger_left_rotations() {
        let index = index_of(&["a", "b", "c", "d", "e", "f", "g"]);
        assert_eq!(index.height(), 3);
        assert!(index.is_balanced());
    }

    #[test]
    fn descending_inserts_trigger_right_rotations() {
        let index = index_of(&["g", "f", "e", "d", "c", "b", "a"]);
        assert_eq!(index.height(), 3);
        assert!(index.is_balanced());
    }

    #[test]
    fn zigzag_inserts_trigger_double_rotations() {
        // Left-right and right-left shapes.
        let lr = index_of(&["c", "a", "b"]);
        assert_eq!(lr.height(), 2);
        assert!(lr.is_balanced());

        let rl = index_of(&["a", "c", "b"]);
        assert_eq!(rl.height(), 2);
        assert!(rl.is_balanced());
    }

    #[test]
    fn duplicate_insert_keeps_original_record() {
        let mut index = OrderedIndex::new();
        let first = record("cat");
        assert!(index.insert("cat", Arc::clone(&first)));

        let mut replacement = TermRecord::new("CAT", TermSource::Manual);
        replacement.key = "cat".to_string();
        assert!(!index.insert("cat", Arc::new(replacement)));

        let found = index.search_prefix("cat");
        assert_eq!(found.len(), 1);
        assert!(Arc::ptr_eq(&found[0], &first));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn prefix_search_finds_exactly_the_matching_keys() {
        let index = index_of(&["cat", "car", "cow", "dog"]);
        let mut found: Vec<String> = index
            .search_prefix("ca")
            .iter()
            .map(|r| r.key.clone())
            .collect();
        found.sort();
        assert_eq!(found, vec!["car", "cat"]);
    }

    #[test]
    fn prefix_search_lowercases_the_needle() {
        let index = index_of(&["cat", "car"]);
        assert_eq!(index.search_prefix("CA").len(), 2);
    }

    #[test]
    fn prefix_search_descends_past_a_matching_ancestor() {
        // "cad" sorts after "cab", and "ca" sorts before both; the right
        // subtree still has to be searched because "cab" extends "ca".
        let index = index_of(&["cab", "cad"]);
        let mut found: Vec<String> = index
            .search_prefix("ca")
            .iter()
            .map(|r| r.key.clone())
            .collect();
        found.sort();
        assert_eq!(found, vec!["cab", "cad"]);
    }

    #[test]
    fn prefix_search_on_empty_prefix_returns_everything() {
        let index = index_of(&["cat", "car", "dog"]);
        assert_eq!(index.search_prefix("").len(), 3);
    }

    #[test]
    fn remove_leaf_and_missing_key() {
        let mut index = index_of(&["cat", "car", "dog"]);
        assert!(index.remove("dog"));
        assert!(!index.remove("dog"));
        assert_eq!(index.len(), 2);
        assert!(index.is_balanced());
    }

    #[test]
    fn remove_node_with_two_children_uses_successor() {
        let mut index = index_of(&["d", "b", "f", "a", "c", "e", "g"]);
        assert!(index.remove("d"));
        assert_eq!(index.keys(), vec!["a", "b", "c", "e", "f", "g"]);
        assert!(index.is_balanced());
    }

    #[test]
    fn remove_rebalances_on_the_way_up() {
        let mut index = index_of(&["d", "b", "f", "a", "c", "e", "g", "h"]);
        // Stripping the left side forces right-heavy rebalances.
        for key in ["a", "b", "c"] {
            assert!(index.remove(key));
            assert!(index.is_balanced(), "unbalanced after removing {key}");
        }
        assert_eq!(index.keys(), vec!["d", "e", "f", "g", "h"]);
    }

    #[test]
    fn clear_releases_everything() {
        let mut index = index_of(&["cat", "car"]);
        index.clear();
        assert_eq!(index.height(), 0);
        assert_eq!(index.len(), 0);
        assert!(index.search_prefix("").is_empty());
    }

    #[test]
    fn keys_come_back_sorted() {
        let index = index_of(&["dog", "ant", "cow", "bee"]);
        assert_eq!(index.keys(), vec!["ant", "bee", "cow", "dog"]);
    }
}
