// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tokenizer stage (spec §4.3, scenario 2 in §8).
//!
//! The source tokenizes with gensim's `simple_preprocess`, whose alphabetic
//! pattern is `(((?![\d])\w)+)` (Unicode `\w`-runs that never include a
//! digit, since the negative lookahead rejects a digit at every repetition
//! step — net effect: digits split tokens instead of joining them, and pure
//! digit runs never become tokens at all). Rust's `regex` crate has no
//! lookaround, but the same "maximal run of letters/marks/underscore, no
//! digits" language is expressible directly as `[\p{L}\p{M}_]+`, so we use
//! that instead of hand-rolling the lookahead.

use std::sync::LazyLock;

use regex::Regex;

static WORD_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\p{L}\p{M}_]+").unwrap());

const MIN_LEN: usize = 2;
const MAX_LEN: usize = 15;

pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD_RUN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .filter(|tok| {
            let len = tok.chars().count();
            (MIN_LEN..=MAX_LEN).contains(&len) && !tok.starts_with('_')
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_2_lowercases_and_splits_on_word_boundaries() {
        let input = "Toto je test na odstranenie novych riadkov a URL adries. ";
        let expected = vec![
            "toto",
            "je",
            "test",
            "na",
            "odstranenie",
            "novych",
            "riadkov",
            "url",
            "adries",
        ];
        assert_eq!(tokenize(input), expected);
    }

    #[test]
    fn drops_tokens_shorter_than_two_or_longer_than_fifteen() {
        let tokens = tokenize("a bb ccccccccccccccc ddddddddddddddddd");
        assert_eq!(tokens, vec!["bb", "ccccccccccccccc"]);
    }

    #[test]
    fn drops_tokens_starting_with_underscore() {
        let tokens = tokenize("_hidden visible");
        assert_eq!(tokens, vec!["visible"]);
    }

    #[test]
    fn digits_split_tokens_without_producing_their_own_token() {
        let tokens = tokenize("covid19 je choroba");
        assert_eq!(tokens, vec!["covid", "je", "choroba"]);
    }

    #[test]
    fn tokenizing_an_already_tokenized_space_joined_list_is_idempotent_modulo_length_filter() {
        let words = vec!["toto", "je", "test", "ab"];
        let joined = words.join(" ");
        assert_eq!(tokenize(&joined), vec!["toto", "je", "test", "ab"]);
    }
}
