// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the lexica command-line interface.
//!
//! Five subcommands: `search` and `suggest` query the index, `context`
//! proposes related vocabulary from free text, `stats` prints index
//! diagnostics, and `extract` pulls candidate terms out of a document.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lexica",
    about = "In-memory vocabulary index with prefix search and typo suggestions",
    version
)]
pub struct Cli {
    /// Path to the JSON term list
    #[arg(short, long, global = true, default_value = "terms.json")]
    pub terms: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the vocabulary by prefix or exact key
    Search {
        /// Search term
        query: String,

        /// Only return the exact-key match
        #[arg(long)]
        exact: bool,

        /// Also match records whose definition contains the term
        #[arg(long)]
        definitions: bool,
    },

    /// Rank near-miss words for a possibly misspelled term
    Suggest {
        /// The term to find neighbors for
        query: String,

        /// Maximum number of suggestions to return
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Propose vocabulary related to a free-text context
    Context {
        /// The context text
        text: String,

        /// Maximum number of suggestions to return
        #[arg(short, long, default_value = "3")]
        limit: usize,

        /// Keep the best score across context tokens instead of the last
        /// token's score when a word is hit more than once
        #[arg(long)]
        max_merge: bool,
    },

    /// Print index statistics
    Stats,

    /// Extract candidate terms from a text file
    Extract {
        /// Input text file
        input: PathBuf,

        /// Only print terms that are not already in the vocabulary
        #[arg(long)]
        new_only: bool,
    },
}
