use std::fs;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lexica::{
    candidate_terms, load_terms, new_terms, ScoreMerge, SearchOptions, VocabularyEngine,
};

mod cli;
use cli::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let records = load_terms(&cli.terms)
        .with_context(|| format!("loading {}", cli.terms.display()))?;

    let merge = match &cli.command {
        Commands::Context { max_merge: true, .. } => ScoreMerge::Max,
        _ => ScoreMerge::Overwrite,
    };
    let mut engine = VocabularyEngine::with_score_merge(merge);
    engine.rebuild(records);

    match cli.command {
        Commands::Search {
            query,
            exact,
            definitions,
        } => {
            let outcome = engine.search(
                &query,
                SearchOptions {
                    exact,
                    include_definitions: definitions,
                },
            );
            for record in &outcome.records {
                println!(
                    "{:<20} {}",
                    record.display_word,
                    record.definition.as_deref().unwrap_or("-")
                );
            }
            println!(
                "{} result{} for \"{}\"",
                outcome.records.len(),
                if outcome.records.len() == 1 { "" } else { "s" },
                query
            );
        }

        Commands::Suggest { query, limit } => {
            let suggestions = engine.suggest_similar(&query, limit);
            if suggestions.is_empty() {
                println!("no suggestions for \"{}\"", query);
            }
            let needle = lexica::normalize_key(&query);
            for record in &suggestions {
                let score = lexica::similarity(&needle, &record.key);
                println!("{:<20} {:.2}", record.display_word, score);
            }
        }

        Commands::Context { text, limit, .. } => {
            let suggestions = engine.suggest_by_context(&text, limit);
            if suggestions.is_empty() {
                println!("no related vocabulary found");
            }
            for record in &suggestions {
                println!(
                    "{:<20} {}",
                    record.display_word,
                    record.definition.as_deref().unwrap_or("-")
                );
            }
        }

        Commands::Stats => {
            let stats = engine.stats();
            println!("Words:       {}", stats.total_words);
            println!("Indexed:     {}", if stats.indexed { "yes" } else { "no" });
            println!("Tree height: {}", stats.tree_height);
            println!("Est. memory: {}", format_size(stats.estimated_size_bytes));
        }

        Commands::Extract { input, new_only } => {
            let text = fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let terms = if new_only {
                new_terms(&text, engine.index())
            } else {
                candidate_terms(&text)
            };
            for term in &terms {
                println!("{term}");
            }
            eprintln!("{} candidate term{}", terms.len(), if terms.len() == 1 { "" } else { "s" });
        }
    }

    Ok(())
}

/// Format bytes as human-readable size
fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
