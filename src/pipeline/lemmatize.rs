// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lemmatizer stage (spec §4.3, §9 Design Notes "Lemmatizer as a capability").
//!
//! The spec treats the morphological analyser as a black-box service:
//! `lemmatize(text) -> [(lemma, pos)]`. The source wires this to
//! `spacy_udpipe`'s Slovak model; no crate in the retrieved corpus provides
//! Slovak morphological analysis, and pulling in an unlisted dependency
//! would violate the "never fabricate dependencies" rule, so we ship one
//! concrete, deterministic stand-in: a small suffix-stripping heuristic with
//! the curated bad-lemma substitution map from `text_preprocessor.py`
//! (`CUSTOM_WORDS`). This is an Open Question resolution — see DESIGN.md —
//! not a claim of full Slovak morphological coverage.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Part-of-speech tag, mirroring spacy/udpipe's Universal POS tagset as far
/// as the spec cares (spec §4.3 `DEFAULT_ALLOWED_POSTAGS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOfSpeech {
    Noun,
    Adj,
    Verb,
    Adv,
    Other,
}

impl PartOfSpeech {
    fn is_allowed(self) -> bool {
        matches!(
            self,
            PartOfSpeech::Noun | PartOfSpeech::Adj | PartOfSpeech::Verb | PartOfSpeech::Adv
        )
    }
}

/// The "external lemmatizer service" capability (spec §9 Design Notes).
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, tokens: &[String]) -> Vec<(String, PartOfSpeech)>;
}

/// Known bad lemmas and their curated substitutions (`CUSTOM_WORDS` in
/// `text_preprocessor.py`).
static BAD_LEMMA_SUBSTITUTIONS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        HashMap::from([("eý", "eú"), ("urť", "url"), ("adries", "adresa")])
    });

fn substitute_bad_lemma(lemma: &str) -> String {
    BAD_LEMMA_SUBSTITUTIONS
        .get(lemma)
        .map(|s| s.to_string())
        .unwrap_or_else(|| lemma.to_string())
}

/// Apply the lemmatizer, then the POS/length filter, then curated
/// substitution, in the order spec §4.3 lists them.
pub fn apply(lemmatizer: &dyn Lemmatizer, tokens: &[String]) -> Vec<String> {
    lemmatizer
        .lemmatize(tokens)
        .into_iter()
        .filter(|(lemma, pos)| pos.is_allowed() && lemma.chars().count() > 1)
        .map(|(lemma, _)| substitute_bad_lemma(&lemma))
        .collect()
}

/// Suffix rules, longest match first: `(suffix, replacement)`. A rough
/// approximation of stripping Slovak case/number endings back toward a
/// nominative-singular-ish base form.
const NOUN_ADJ_SUFFIXES: &[(&str, &str)] = &[
    ("kov", "ok"),
    ("ových", "ový"),
    ("ami", ""),
    ("iam", ""),
    ("ach", ""),
    ("ych", "y"),
    ("ej", "a"),
    ("ov", ""),
    ("om", ""),
];

const ADVERB_CLOSED_SET: &[&str] = &[
    "veľmi", "rýchlo", "pomaly", "dnes", "včera", "zajtra", "potom", "tu", "tam",
];

const VERB_SUFFIXES: &[&str] = &["ovať", "núť", "ať", "iť", "uje", "ujú", "li"];
const ADJ_SUFFIX_HINTS: &[&str] = &["ý", "á", "é", "ej", "ych", "ym", "ou", "eho"];

/// Deterministic, dependency-free stand-in for the external Slovak
/// lemmatizer service.
#[derive(Debug, Default)]
pub struct RuleBasedLemmatizer;

impl RuleBasedLemmatizer {
    fn lemma_of(tok: &str) -> String {
        for (suffix, replacement) in NOUN_ADJ_SUFFIXES {
            if tok.len() > suffix.len() + 2 && tok.ends_with(suffix) {
                return format!("{}{replacement}", &tok[..tok.len() - suffix.len()]);
            }
        }
        tok.to_string()
    }

    fn pos_of(tok: &str) -> PartOfSpeech {
        if ADVERB_CLOSED_SET.contains(&tok) {
            return PartOfSpeech::Adv;
        }
        if VERB_SUFFIXES.iter().any(|s| tok.ends_with(s)) {
            return PartOfSpeech::Verb;
        }
        if ADJ_SUFFIX_HINTS.iter().any(|s| tok.ends_with(s)) {
            return PartOfSpeech::Adj;
        }
        PartOfSpeech::Noun
    }
}

impl Lemmatizer for RuleBasedLemmatizer {
    fn lemmatize(&self, tokens: &[String]) -> Vec<(String, PartOfSpeech)> {
        tokens
            .iter()
            .map(|tok| (Self::lemma_of(tok), Self::pos_of(tok)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn scenario_4_lemma_examples_match_the_suffix_rules() {
        let lemmatizer = RuleBasedLemmatizer;
        let input = tokens(&["test", "odstranenie", "novych", "riadkov", "url", "adries"]);
        let out = apply(&lemmatizer, &input);
        assert_eq!(out, vec!["test", "odstranenie", "novy", "riadok", "url", "adresa"]);
    }

    #[test]
    fn curated_substitution_applies_after_filtering() {
        assert_eq!(substitute_bad_lemma("eý"), "eú");
        assert_eq!(substitute_bad_lemma("urť"), "url");
        assert_eq!(substitute_bad_lemma("adries"), "adresa");
        assert_eq!(substitute_bad_lemma("unrelated"), "unrelated");
    }

    #[test]
    fn single_character_lemmas_are_dropped() {
        struct Stub;
        impl Lemmatizer for Stub {
            fn lemmatize(&self, tokens: &[String]) -> Vec<(String, PartOfSpeech)> {
                tokens
                    .iter()
                    .map(|_| ("x".to_string(), PartOfSpeech::Noun))
                    .collect()
            }
        }
        assert!(apply(&Stub, &tokens(&["anything"])).is_empty());
    }

    #[test]
    fn disallowed_pos_is_dropped() {
        struct Stub;
        impl Lemmatizer for Stub {
            fn lemmatize(&self, tokens: &[String]) -> Vec<(String, PartOfSpeech)> {
                tokens
                    .iter()
                    .map(|t| (t.clone(), PartOfSpeech::Other))
                    .collect()
            }
        }
        assert!(apply(&Stub, &tokens(&["preposition"])).is_empty());
    }
}
