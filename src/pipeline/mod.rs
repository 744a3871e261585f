// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Preprocessing Pipeline (C3, spec §4.3).
//!
//! A pipeline is a closed set of named stages, always executed in the
//! canonical order below regardless of the order the caller listed them in
//! (spec §4.3 "Configuration contract"). The payload carried on `Page.terms`
//! changes type mid-pipeline — string after `normalize`, token list after
//! `tokenize` — so rather than force one dynamic carrier type through every
//! stage (spec §9 Design Notes explicitly warns against collapsing this into
//! a union type) we model it as two sub-chains joined by the tokenizer,
//! exactly as the design notes prescribe.

pub mod lemmatize;
pub mod normalize;
pub mod stopwords;
pub mod tokenize;

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::checkpoint::CheckpointStore;
use crate::error::Result;
use crate::types::Page;

use self::lemmatize::Lemmatizer;

/// One of the six closed configuration keys from spec §4.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKey {
    Normalize,
    Tokenize,
    RemoveStopwords,
    Lemmatize,
    StopWordsCleaner,
    DocumentSaver,
}

impl StageKey {
    /// Canonical order is the discriminant order above, which matches the
    /// table in spec §4.3 top to bottom.
    fn canonical_rank(self) -> u8 {
        self as u8
    }
}

/// A composable chain of stages (spec §4.3). Construction canonicalizes and
/// dedups the requested stage set; execution always follows canonical order.
pub struct Pipeline {
    stages: Vec<StageKey>,
    stop_words: Arc<HashSet<String>>,
    lemmatizer: Arc<dyn Lemmatizer>,
    checkpoint: Option<Arc<CheckpointStore>>,
}

impl Pipeline {
    pub fn new(
        requested: &[StageKey],
        stop_words: Arc<HashSet<String>>,
        lemmatizer: Arc<dyn Lemmatizer>,
        checkpoint: Option<Arc<CheckpointStore>>,
    ) -> Self {
        let mut stages: Vec<StageKey> = requested.to_vec();
        stages.sort_by_key(|s| s.canonical_rank());
        stages.dedup();
        Pipeline {
            stages,
            stop_words,
            lemmatizer,
            checkpoint,
        }
    }

    /// Build the single-document query pipeline (spec §4.8 step 1): same
    /// stage set minus `document_saver`, which MUST be disabled for queries.
    pub fn for_query(
        requested: &[StageKey],
        stop_words: Arc<HashSet<String>>,
        lemmatizer: Arc<dyn Lemmatizer>,
    ) -> Self {
        let filtered: Vec<StageKey> = requested
            .iter()
            .copied()
            .filter(|s| *s != StageKey::DocumentSaver)
            .collect();
        Pipeline::new(&filtered, stop_words, lemmatizer, None)
    }

    /// Run the pipeline over one document, writing results back into
    /// `page.terms`. If a checkpoint store is configured and already has a
    /// row for this title, preprocessing is skipped entirely (spec §4.4).
    pub fn process(&self, page: &mut Page) -> Result<()> {
        if let Some(checkpoint) = &self.checkpoint {
            if let Some(cached) = checkpoint.lookup(&page.title) {
                debug!(title = %page.title, "checkpoint hit, skipping preprocessing");
                page.terms = cached;
                page.discard_raw_text();
                return Ok(());
            }
        }

        let mut text = page.raw_text.clone().unwrap_or_default();
        let mut tokens: Vec<String> = Vec::new();
        let mut tokenized = false;

        for stage in &self.stages {
            match stage {
                StageKey::Normalize => {
                    text = normalize::normalize(&text);
                }
                StageKey::Tokenize => {
                    tokens = tokenize::tokenize(&text);
                    tokenized = true;
                }
                StageKey::RemoveStopwords | StageKey::StopWordsCleaner => {
                    let source = if tokenized {
                        std::mem::take(&mut tokens)
                    } else {
                        tokenize::tokenize(&text)
                    };
                    tokens = stopwords::remove_stopwords(&source, &self.stop_words);
                    tokenized = true;
                }
                StageKey::Lemmatize => {
                    tokens = lemmatize::apply(self.lemmatizer.as_ref(), &tokens);
                }
                StageKey::DocumentSaver => {
                    if let Some(checkpoint) = &self.checkpoint {
                        checkpoint.append(page.doc_id, &page.title, &tokens)?;
                    }
                }
            }
        }

        page.terms = tokens;
        page.discard_raw_text();
        Ok(())
    }
}
