//! In-memory vocabulary indexing and search.
//!
//! This crate provides the query engine behind a vocabulary application:
//! prefix lookup over a self-balancing tree, O(1) exact lookup, edit-distance
//! "did you mean" ranking, and length/context-based related-term suggestions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌───────────────┐     ┌────────────────┐
//! │  types.rs   │────▶│ ordered.rs    │────▶│ vocabulary.rs  │
//! │ (TermRecord,│     │ (AVL tree,    │     │ (rebuild,      │
//! │  outcomes)  │     │  prefix scan) │     │  search, stats)│
//! └─────────────┘     └───────────────┘     └────────────────┘
//!        │                    │                      │
//!        ▼                    ▼                      ▼
//! ┌──────────────┐    ┌───────────────┐     ┌────────────────┐
//! │similarity.rs │───▶│ classifier.rs │────▶│   engine.rs    │
//! │ (Levenshtein,│    │ (buckets,     │     │ (owning facade,│
//! │  similarity) │    │  context)     │     │  one lifecycle)│
//! └──────────────┘    └───────────────┘     └────────────────┘
//! ```
//!
//! The engine is a synchronous, single-writer component: `rebuild` replaces
//! everything, queries never mutate, and hosts that spread it across threads
//! serialize mutations against reads (or swap in a freshly built engine).
//!
//! # Usage
//!
//! ```
//! use lexica::{SearchOptions, TermRecord, TermSource, VocabularyEngine};
//!
//! let mut engine = VocabularyEngine::new();
//! engine.rebuild(vec![
//!     TermRecord::new("algorithm", TermSource::Manual).with_definition("a finite procedure"),
//!     TermRecord::new("database", TermSource::Manual),
//! ]);
//!
//! let outcome = engine.search("algo", SearchOptions::default());
//! assert_eq!(outcome.records[0].key, "algorithm");
//!
//! let close = engine.suggest_similar("algorith", 3);
//! assert_eq!(close[0].key, "algorithm");
//! ```

// Module declarations
pub mod classifier;
pub mod engine;
pub mod extract;
pub mod loader;
pub mod ordered;
pub mod similarity;
pub mod types;
pub mod vocabulary;

// Re-exports for public API
pub use classifier::{ContextClassifier, LengthCategory, ScoreMerge};
pub use engine::VocabularyEngine;
pub use extract::{candidate_terms, new_terms};
pub use loader::{load_terms, save_terms, LoadError};
pub use ordered::OrderedIndex;
pub use similarity::{edit_distance, similarity};
pub use types::{
    IndexStats, IndexStatus, SearchOptions, SearchOutcome, TermRecord, TermSource,
};
pub use vocabulary::{normalize_key, VocabularyIndex};
