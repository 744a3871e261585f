// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search Engine (C8, spec §4.8).
//!
//! Mirrors `slovak_wiki_search_engine/search_engine.py`'s `SearchEngine.search`:
//! preprocess the query as a transient page, build the candidate set by
//! AND/OR over postings, vectorize the query, score candidates by the
//! `terms`-aligned cosine procedure spec §4.8 step 4 spells out, sort
//! descending, cut off at K.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::corpus::DocumentStore;
use crate::error::SearchEngineError;
use crate::index::InvertedIndex;
use crate::pipeline::Pipeline;
use crate::types::{DocId, Page};
use crate::vectorizer::{TfIdfVectorizer, VectorizerConfig};

/// Boolean combinator over query-term postings (spec §4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOperator {
    And,
    Or,
}

/// One ranked hit (spec §4.8 step 5: "list of (page, score)").
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub page: &'a Page,
    pub score: f64,
}

pub struct SearchEngine<'a> {
    index: &'a InvertedIndex,
    documents: &'a DocumentStore,
    query_pipeline: Pipeline,
    vectorizer_config: VectorizerConfig,
    /// Cap on the candidate set's size before scoring (spec §6 CLI `-x`,
    /// config `relevant_documents_count`). The captured source assigns this
    /// value but never reads it back in `search()` — we give it the
    /// sensible effect its name implies (cap candidates before the O(q·d)
    /// scoring pass) rather than carrying it as dead configuration; see
    /// DESIGN.md.
    relevant_documents_cap: usize,
}

impl<'a> SearchEngine<'a> {
    pub fn new(
        index: &'a InvertedIndex,
        documents: &'a DocumentStore,
        query_pipeline: Pipeline,
        vectorizer_config: VectorizerConfig,
        relevant_documents_cap: usize,
    ) -> Self {
        SearchEngine {
            index,
            documents,
            query_pipeline,
            vectorizer_config,
            relevant_documents_cap,
        }
    }

    /// Run a query to completion (spec §4.8 steps 1-5). Never errors: an
    /// empty query, an all-stop-word query, or an empty AND-intersection
    /// all resolve to an empty result list (spec §4.8 "Failure semantics"),
    /// not a `Result::Err`.
    pub fn search(&self, query: &str, operator: BooleanOperator, k: usize) -> Vec<SearchHit<'a>> {
        let mut query_page = Page::for_query(query.to_string());
        if let Err(e) = self.query_pipeline.process(&mut query_page) {
            warn!(error = %e, "query preprocessing failed, treating as empty query");
            return Vec::new();
        }
        info!(terms = ?query_page.terms, "preprocessed query");

        if query_page.terms.is_empty() {
            return Vec::new();
        }

        let (surviving_terms, candidates) = self.build_candidate_set(&query_page.terms, operator);
        info!(count = candidates.len(), "relevant documents count");

        if surviving_terms.is_empty() || candidates.is_empty() {
            return Vec::new();
        }

        let vectorizer = TfIdfVectorizer::new(
            self.documents.len() as u64,
            self.index,
            self.vectorizer_config,
        );
        query_page.terms = surviving_terms;
        query_page.vector = vectorizer.vectorize(&query_page.terms);

        let mut candidate_ids: Vec<DocId> = candidates.into_iter().collect();
        candidate_ids.sort_by_key(|d| d.0);
        if candidate_ids.len() > self.relevant_documents_cap {
            candidate_ids.truncate(self.relevant_documents_cap);
        }

        let mut scored: Vec<SearchHit<'a>> = candidate_ids
            .into_iter()
            .filter_map(|doc_id| self.documents.get(doc_id))
            .map(|page| SearchHit {
                page,
                score: cosine_score(&query_page, page),
            })
            .collect();

        // Stable sort: ties keep the ascending-doc_id order established
        // above (spec §4.8 "Tie-breaking: stable sort preserves postings
        // iteration order; no additional tie-break is required").
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        scored.truncate(k);
        info!(returned = scored.len(), "search complete");
        scored
    }

    /// Spec §4.8 step 2, including the known source quirk (§9 Design
    /// Notes): AND mode does NOT start from an empty (therefore always-empty
    /// after intersection) set — the first surviving term's postings become
    /// the base, and only later terms are intersected against it. A missing
    /// first term is simply dropped and the next surviving term becomes the
    /// base instead; it must never zero out the whole query.
    fn build_candidate_set(
        &self,
        query_terms: &[String],
        operator: BooleanOperator,
    ) -> (Vec<String>, HashSet<DocId>) {
        let mut seen_terms = HashSet::new();
        let mut surviving_terms = Vec::new();
        let mut base: Option<HashSet<DocId>> = None;

        for term in query_terms {
            if !seen_terms.insert(term.clone()) {
                continue;
            }
            match self.index.get(term) {
                Ok(record) => {
                    surviving_terms.push(term.clone());
                    base = Some(match base {
                        None => record.documents.clone(),
                        Some(current) => match operator {
                            BooleanOperator::And => {
                                current.intersection(&record.documents).copied().collect()
                            }
                            BooleanOperator::Or => {
                                current.union(&record.documents).copied().collect()
                            }
                        },
                    });
                }
                Err(SearchEngineError::MissingTerm(_)) => {
                    warn!(term, "term not in corpus, dropping from query");
                }
                Err(e) => warn!(error = %e, "unexpected index error"),
            }
        }

        (surviving_terms, base.unwrap_or_default())
    }
}

/// Spec §4.8 step 4: for each query token at position `i` with weight
/// `q_i`, find its first occurrence position `j` in `d.terms` and add
/// `q_i * d.vector[j]`; absent contributes 0. Since both vectors are
/// L2-normalized, this sum is exactly the cosine similarity between the
/// query and the document over their shared terms.
fn cosine_score(query: &Page, document: &Page) -> f64 {
    let mut score = 0.0;
    for (i, term) in query.terms.iter().enumerate() {
        let Some(weight) = query.vector.get(i) else {
            continue;
        };
        if let Some(j) = document.terms.iter().position(|t| t == term) {
            if let Some(doc_weight) = document.vector.get(j) {
                score += weight * doc_weight;
            }
        }
    }
    score
}
