// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! TF-IDF Vectorizer (C7, spec §4.7).
//!
//! Mirrors `slovak_wiki_search_engine/vectorizer.py`'s `TfIdfVectorizer`: one
//! weight per token *occurrence* in `document.terms`, not per distinct term
//! (spec §4.7 — this is what lets search pair a query token to a document
//! position in O(q · d) without building a sparse vocabulary vector, per
//! spec §9 Design Notes). `tf`/`idf` each have two selectable variants
//! (`sublinear_tf`, `smooth_idf`); the source's own `test_tfidf.py` fixes the
//! plain-variant numbers we use as scenario 6's regression test. The
//! L2-normalization pass over the finished vector is spec §4.7's own
//! addition on top of the source's raw `_tfidf` (no normalization appears in
//! the captured Python, but the spec mandates it and the scenario in §8
//! covers the unnormalized numbers, not the final vector, so normalizing
//! after is the only reading consistent with both).

use crate::index::InvertedIndex;
use crate::types::Page;

/// Term-frequency variant (spec §4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermFrequency {
    /// `count(t, d) / |d|`.
    Raw,
    /// `1 + log10(count(t, d))`.
    Sublinear,
}

/// Inverse-document-frequency variant (spec §4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InverseDocumentFrequency {
    /// `log10(N / df(t))`.
    Plain,
    /// `log10((1 + N) / (1 + df(t))) + 1`.
    Smoothed,
}

#[derive(Debug, Clone, Copy)]
pub struct VectorizerConfig {
    pub tf: TermFrequency,
    pub idf: InverseDocumentFrequency,
}

impl VectorizerConfig {
    pub fn from_flags(sublinear_tf: bool, smooth_idf: bool) -> Self {
        VectorizerConfig {
            tf: if sublinear_tf {
                TermFrequency::Sublinear
            } else {
                TermFrequency::Raw
            },
            idf: if smooth_idf {
                InverseDocumentFrequency::Smoothed
            } else {
                InverseDocumentFrequency::Plain
            },
        }
    }
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        VectorizerConfig::from_flags(false, false)
    }
}

pub struct TfIdfVectorizer<'a> {
    document_count: u64,
    index: &'a InvertedIndex,
    config: VectorizerConfig,
}

impl<'a> TfIdfVectorizer<'a> {
    pub fn new(document_count: u64, index: &'a InvertedIndex, config: VectorizerConfig) -> Self {
        TfIdfVectorizer {
            document_count,
            index,
            config,
        }
    }

    /// Produce the vector parallel to `terms`: one weight per occurrence
    /// (spec §4.7). Empty input yields an empty vector. After all weights
    /// are computed, the vector is L2-normalized to unit length; a
    /// zero-norm vector (e.g. every term's `idf` is zero) is left as-is
    /// (spec §4.7 edge cases).
    pub fn vectorize(&self, terms: &[String]) -> Vec<f64> {
        if terms.is_empty() {
            return Vec::new();
        }

        let mut vector: Vec<f64> = terms.iter().map(|term| self.tfidf(term, terms)).collect();

        let norm: f64 = vector.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for w in &mut vector {
                *w /= norm;
            }
        }
        vector
    }

    /// Convenience wrapper that vectorizes `page.terms` directly and writes
    /// the result back, matching the source's `vectorize_document`.
    pub fn vectorize_document(&self, page: &mut Page) {
        page.vector = self.vectorize(&page.terms);
    }

    fn tfidf(&self, term: &str, terms: &[String]) -> f64 {
        self.tf(term, terms) * self.idf(term)
    }

    fn tf(&self, term: &str, terms: &[String]) -> f64 {
        let count = terms.iter().filter(|t| t.as_str() == term).count();
        match self.config.tf {
            TermFrequency::Raw => count as f64 / terms.len() as f64,
            TermFrequency::Sublinear => {
                if count == 0 {
                    0.0
                } else {
                    1.0 + (count as f64).log10()
                }
            }
        }
    }

    /// A term absent from the index (e.g. a just-preprocessed query token
    /// never seen in the corpus) contributes an `idf` of 0 rather than
    /// propagating `MissingTerm` here — the caller (search, spec §4.8) is
    /// responsible for dropping unknown terms from the candidate set before
    /// vectorizing; this is only a defensive fallback for direct callers.
    fn idf(&self, term: &str) -> f64 {
        let df = match self.index.get(term) {
            Ok(record) => record.document_frequency,
            Err(_) => return 0.0,
        };
        if df == 0 {
            return 0.0;
        }
        let n = self.document_count as f64;
        let df = df as f64;
        match self.config.idf {
            InverseDocumentFrequency::Plain => (n / df).log10(),
            InverseDocumentFrequency::Smoothed => ((1.0 + n) / (1.0 + df)).log10() + 1.0,
        }
    }
}
