// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Normalizer stage (spec §4.3, scenario 1 in §8).
//!
//! Mirrors `text_preprocessor.py`'s `Normalizer.process` step for step:
//! collapse whitespace runs, replace zero-width spaces with a plain space,
//! strip URLs, then NFKC-normalize.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"http\S+").unwrap());
const ZERO_WIDTH_SPACE: char = '\u{200b}';

pub fn normalize(text: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    let no_zwsp = collapsed.replace(ZERO_WIDTH_SPACE, " ");
    let no_urls = URL.replace_all(&no_zwsp, "");
    no_urls.nfkc().collect()
}
