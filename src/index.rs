// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted Index (C6, spec §4.6).
//!
//! `doc_id`-keyed postings rather than cyclic page references (spec §9
//! Design Notes): a record's `documents` set is `HashSet<DocId>`, and the
//! document bodies themselves live in a separate `doc_id -> Page` table
//! owned by the caller (the build pipeline) and persisted alongside the
//! index by [`crate::binary`]. This mirrors the teacher's own split between
//! `InvertedIndex` (term -> postings) and a separate document table in
//! `src/index.rs`.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::binary::codec;
use crate::error::{Result, SearchEngineError};
use crate::types::{DocId, Page};

/// One term's posting list plus the two frequency counters spec §4.6 names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexRecord {
    /// Number of distinct documents containing the term.
    pub document_frequency: u64,
    /// Total number of occurrences of the term across the whole corpus.
    pub corpus_frequency: u64,
    pub documents: HashSet<DocId>,
}

impl IndexRecord {
    fn record_occurrence(&mut self, doc_id: DocId) {
        self.corpus_frequency += 1;
        if self.documents.insert(doc_id) {
            self.document_frequency += 1;
        }
    }
}

/// Map term -> [`IndexRecord`] (spec §4.6).
///
/// Invariant: after `insert_document` has run over every page, `documents_count
/// == |distinct pages seen|` (spec §4.6).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvertedIndex {
    terms: HashMap<String, IndexRecord>,
    documents_count: u64,
    seen: HashSet<DocId>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex::default()
    }

    /// For each term in `page.terms`: create the record on first sight, add
    /// the page to `documents` (set semantics by `doc_id`), bump
    /// `corpus_frequency` every occurrence, bump `document_frequency` on the
    /// first occurrence for that document (spec §4.6).
    pub fn insert_document(&mut self, page: &Page) {
        for term in &page.terms {
            self.terms
                .entry(term.clone())
                .or_default()
                .record_occurrence(page.doc_id);
        }
        if self.seen.insert(page.doc_id) {
            self.documents_count += 1;
        }
    }

    /// Lookup a term's posting record. Absence is a distinct, non-fatal
    /// condition (`MissingTerm`, spec §4.6) so callers can drop the term
    /// from an active query instead of aborting.
    pub fn get(&self, term: &str) -> Result<&IndexRecord> {
        self.terms
            .get(term)
            .ok_or_else(|| SearchEngineError::MissingTerm(term.to_string()))
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    pub fn documents_count(&self) -> u64 {
        self.documents_count
    }

    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    /// Durable serialization (spec §4.6): a tagged binary container, schema
    /// versioned, with a CRC32 footer — the teacher's own framing pattern
    /// (`src/binary/header.rs`), adapted to this schema.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        codec::save_index(path.as_ref(), self)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        codec::load_index(path.as_ref())
    }
}
