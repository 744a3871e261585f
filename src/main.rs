// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `skwiki` CLI: build and search an inverted index over a Slovak Wikipedia
//! XML dump.
//!
//! ```bash
//! # Parse the dump, preprocess every page, build and persist the index
//! skwiki build --config config.json
//!
//! # Query the persisted index
//! skwiki search --config config.json "slovenska historia" -n 5
//! ```

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;

use skwiki_search::config::Config;
use skwiki_search::pipeline::lemmatize::RuleBasedLemmatizer;
use skwiki_search::pipeline::{stopwords, Pipeline};
use skwiki_search::search::{BooleanOperator, SearchEngine};
use skwiki_search::vectorizer::VectorizerConfig;
use skwiki_search::{builder, snapshot, SearchEngineError};

mod cli;
use cli::display::{
    double_divider, double_footer, double_header, rank_badge, row, score_value, section_bot,
    section_top, title, warning,
};
use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build { config } => run_build(&config),
        Commands::Search {
            config,
            query,
            or,
            count,
            relevant_documents_cap,
        } => run_search(&config, &query, or, count, relevant_documents_cap),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            warning(&format!("error: {e}"));
            ExitCode::FAILURE
        }
    }
}

fn run_build(config_path: &std::path::Path) -> Result<(), SearchEngineError> {
    let config = Config::load(config_path)?;
    skwiki_search::logging::init(config.verbose);

    double_header();
    title("skwiki build");
    double_divider();

    let start = Instant::now();
    let (index, documents) = builder::build(&config)?;
    let elapsed = start.elapsed();

    row(&format!(
        "documents indexed : {}",
        index.documents_count()
    ));
    row(&format!("vocabulary size    : {}", index.vocabulary_size()));
    row(&format!("elapsed            : {:.2?}", elapsed));
    row(&format!(
        "persisted to       : {}",
        config.inverted_index_path.display()
    ));
    let _ = documents;
    double_footer();

    Ok(())
}

fn run_search(
    config_path: &std::path::Path,
    query: &str,
    or_mode: bool,
    count: usize,
    relevant_documents_cap: Option<usize>,
) -> Result<(), SearchEngineError> {
    let config = Config::load(config_path)?;
    skwiki_search::logging::init(config.verbose);

    if query.trim().is_empty() {
        return Err(SearchEngineError::EmptyQuery);
    }

    let (index, documents) = snapshot::load(&config.inverted_index_path)?;

    let stop_words = Arc::new(stopwords::load_stop_words(&config.stop_words_path)?);
    let lemmatizer = Arc::new(RuleBasedLemmatizer::default());
    let query_pipeline = Pipeline::for_query(&config.preprocessor_components, stop_words, lemmatizer);
    let vectorizer_config = VectorizerConfig::from_flags(config.sublinear_tf, config.smooth_idf);
    let cap = relevant_documents_cap.unwrap_or(config.relevant_documents_count);

    let engine = SearchEngine::new(&index, &documents, query_pipeline, vectorizer_config, cap);
    let operator = if or_mode {
        BooleanOperator::Or
    } else {
        BooleanOperator::And
    };
    let hits = engine.search(query, operator, count);

    double_header();
    title(&format!("skwiki search: \"{query}\""));
    double_divider();

    if hits.is_empty() {
        row("no results");
    } else {
        section_top("results");
        for (i, hit) in hits.iter().enumerate() {
            row(&format!(
                "{}  {}  {}",
                rank_badge(i + 1),
                score_value(hit.score),
                hit.page.title
            ));
        }
        section_bot();
    }
    double_footer();

    Ok(())
}
