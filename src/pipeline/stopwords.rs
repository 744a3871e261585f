// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! StopWordsFilter stage (spec §4.3, scenario 3 in §8). Applied twice in the
//! canonical pipeline: once before lemmatization (`remove_stopwords`) and
//! once after (`stop_words_cleaner`), since lemmatization can produce forms
//! that are themselves stop words (spec §4.3).

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Result, SearchEngineError};

/// Load a stop-word file (spec §6): one lower-cased, trimmed term per line.
pub fn load_stop_words(path: impl AsRef<Path>) -> Result<HashSet<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| SearchEngineError::io(path, e))?;
    Ok(text
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect())
}

/// Drop tokens present in `stop_words` OR of length <= 1 (spec §4.3).
pub fn remove_stopwords(tokens: &[String], stop_words: &HashSet<String>) -> Vec<String> {
    tokens
        .iter()
        .filter(|tok| tok.chars().count() > 1 && !stop_words.contains(tok.as_str()))
        .cloned()
        .collect()
}
