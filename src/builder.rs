// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index build pipeline: dump -> C1 -> pages -> C3 (through C5; C4
//! memoises) -> preprocessed pages -> C6 (insert) -> C7 (vectorize) ->
//! persist index + vectors (spec §2 "Data flow at index build").

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::checkpoint::CheckpointStore;
use crate::config::Config;
use crate::corpus::DocumentStore;
use crate::error::Result;
use crate::index::InvertedIndex;
use crate::parallel::{self, ExecutionMode};
use crate::parser;
use crate::pipeline::lemmatize::{Lemmatizer, RuleBasedLemmatizer};
use crate::pipeline::{stopwords, Pipeline};
use crate::snapshot;
use crate::vectorizer::{TfIdfVectorizer, VectorizerConfig};

/// Run the full build: parse the dump, preprocess every page in parallel
/// (spec §4.5 `ExecutionMode::Process` — the lemmatizer is CPU-bound),
/// insert into the inverted index, vectorize every document against the
/// completed index, and persist the result (spec §6 "Persisted index
/// layout").
pub fn build(config: &Config) -> Result<(InvertedIndex, DocumentStore)> {
    let (index, documents) = build_in_memory(config)?;
    info!(path = %config.inverted_index_path.display(), "persisting index snapshot");
    snapshot::save(&config.inverted_index_path, &index, &documents)?;
    Ok((index, documents))
}

/// Same as [`build`] without persisting — split out so tests and `search`'s
/// own "build a fresh tiny corpus" fixtures don't need a scratch directory.
pub fn build_in_memory(config: &Config) -> Result<(InvertedIndex, DocumentStore)> {
    build_with_lemmatizer(config, Arc::new(RuleBasedLemmatizer::default()))
}

pub fn build_with_lemmatizer(
    config: &Config,
    lemmatizer: Arc<dyn Lemmatizer>,
) -> Result<(InvertedIndex, DocumentStore)> {
    info!(path = %config.sk_wikipedia_dump_path.display(), "parsing dump");
    let pages = parser::parse_dump(&config.sk_wikipedia_dump_path)?;
    info!(count = pages.len(), "pages parsed");

    let stop_words = Arc::new(stopwords::load_stop_words(&config.stop_words_path)?);
    let checkpoint = Arc::new(CheckpointStore::open(&config.already_processed_path)?);
    let pipeline = Arc::new(Pipeline::new(
        &config.preprocessor_components,
        stop_words,
        lemmatizer,
        Some(checkpoint),
    ));

    info!(workers = config.workers, "preprocessing pages in parallel");
    let total = pages.len() as u64;
    let progress = if config.verbose {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} pages preprocessed")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    } else {
        None
    };
    let done = Arc::new(AtomicUsize::new(0));

    let preprocessed = parallel::execute(pages, config.workers, ExecutionMode::Process, {
        let pipeline = Arc::clone(&pipeline);
        let progress = progress.clone();
        let done = Arc::clone(&done);
        move |slice| {
            let mut out = Vec::with_capacity(slice.len());
            for page in slice {
                let mut page = page.clone();
                match pipeline.process(&mut page) {
                    Ok(()) => out.push(page),
                    Err(e) => {
                        tracing::warn!(title = %page.title, error = %e, "dropping page, preprocessing failed");
                    }
                }
                let count = done.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(bar) = &progress {
                    bar.set_position(count as u64);
                }
            }
            out
        }
    });
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    let mut index = InvertedIndex::new();
    for page in &preprocessed {
        index.insert_document(page);
    }
    info!(
        documents = index.documents_count(),
        terms = index.vocabulary_size(),
        "inverted index built"
    );

    let vectorizer_config = VectorizerConfig::from_flags(config.sublinear_tf, config.smooth_idf);
    let mut vectorized = preprocessed;
    {
        let vectorizer = TfIdfVectorizer::new(index.documents_count(), &index, vectorizer_config);
        for page in &mut vectorized {
            vectorizer.vectorize_document(page);
        }
    }

    let documents = DocumentStore::from_pages(vectorized);
    Ok((index, documents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn builds_and_persists_a_tiny_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let dump = write_file(
            dir.path(),
            "dump.xml",
            r#"<mediawiki>
<page><title>Rusko</title><revision><text>Rusko je štát vo východnej Európe.</text></revision></page>
<page><title>Bratislava</title><revision><text>Bratislava je mesto na Slovensku.</text></revision></page>
</mediawiki>"#,
        );
        let stop_words = write_file(dir.path(), "stopwords.txt", "je\nna\nvo\na\n");

        let config = Config {
            inverted_index_path: dir.path().join("index.bin"),
            sk_wikipedia_dump_path: dump,
            stop_words_path: stop_words,
            already_processed_path: dir.path().join("checkpoint.jsonl"),
            preprocessor_components: crate::config::default_preprocessor_components(),
            workers: 2,
            verbose: false,
            relevant_documents_count: 1000,
            sublinear_tf: false,
            smooth_idf: false,
        };

        let (index, documents) = build(&config).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(index.documents_count(), 2);
        assert!(config.inverted_index_path.exists());

        let (reloaded_index, reloaded_documents) = snapshot::load(&config.inverted_index_path).unwrap();
        assert_eq!(reloaded_index.documents_count(), index.documents_count());
        assert_eq!(reloaded_documents.len(), documents.len());
    }

    #[test]
    fn checkpoint_is_populated_after_a_build() {
        let dir = tempfile::tempdir().unwrap();
        let dump = write_file(
            dir.path(),
            "dump.xml",
            "<page><title>X</title><revision><text>obsah stranky tu</text></revision></page>",
        );
        let stop_words = write_file(dir.path(), "stopwords.txt", "");

        let config = Config {
            inverted_index_path: dir.path().join("index.bin"),
            sk_wikipedia_dump_path: dump,
            stop_words_path: stop_words,
            already_processed_path: dir.path().join("checkpoint.jsonl"),
            preprocessor_components: crate::config::default_preprocessor_components(),
            workers: 1,
            verbose: false,
            relevant_documents_count: 1000,
            sublinear_tf: false,
            smooth_idf: false,
        };

        build(&config).unwrap();
        assert!(config.already_processed_path.exists());
        let checkpoint = CheckpointStore::open(&config.already_processed_path).unwrap();
        assert!(checkpoint.lookup("X").is_some());
    }
}
