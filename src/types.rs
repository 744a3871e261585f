// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Core data model (spec §3): `Page`, `Infobox`, and the checkpoint row.
//!
//! `IndexRecord`/`InvertedIndex` live in [`crate::index`] since they're tied
//! to the index's own postings representation; the vector/TF-IDF weights live
//! alongside `Page` here because they are addressed by the same index used by
//! `terms` (spec §9 Design Notes: "vector aligned to terms, not a vocabulary").

use serde::{Deserialize, Serialize};

/// Type-safe document identifier. Assigned in dump-parse order starting at 0
/// (spec §4.1); `-1` is reserved for the transient query "page" (spec §4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocId(pub i64);

impl DocId {
    pub const QUERY: DocId = DocId(-1);

    #[inline]
    pub fn as_usize(self) -> Option<usize> {
        if self.0 >= 0 {
            Some(self.0 as usize)
        } else {
            None
        }
    }
}

impl From<i64> for DocId {
    fn from(id: i64) -> Self {
        DocId(id)
    }
}

/// A structured infobox sidebar (spec §3, §4.2).
///
/// `properties` is insertion-ordered and non-empty — an infobox with no
/// surviving attributes is rejected upstream (`parse_infobox` returns `None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Infobox {
    pub name: String,
    pub properties: Vec<(String, String)>,
}

impl Infobox {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A single parsed/preprocessed wiki page (spec §3 "Page").
///
/// Invariant: `vector.len() == terms.len()` once `vector` is populated (spec
/// §3, §8). `raw_text` may be dropped once preprocessing completes; we model
/// that as `Option` rather than clearing a `String` in place so the freed
/// state is visible in the type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub doc_id: DocId,
    pub title: String,
    pub raw_text: Option<String>,
    pub infobox: Option<Infobox>,
    /// Ordered token stream, original order, duplicates retained (needed for
    /// TF counting — spec §3).
    pub terms: Vec<String>,
    /// TF-IDF weight parallel to `terms` (one weight per occurrence, not per
    /// distinct term — spec §4.7).
    pub vector: Vec<f64>,
}

impl Page {
    pub fn new(doc_id: DocId, title: String, raw_text: String) -> Self {
        Page {
            doc_id,
            title,
            raw_text: Some(raw_text),
            infobox: None,
            terms: Vec::new(),
            vector: Vec::new(),
        }
    }

    /// Transient page used at query time (spec §4.8 step 1): `doc_id = -1`,
    /// no title, no infobox.
    pub fn for_query(text: String) -> Self {
        Page {
            doc_id: DocId::QUERY,
            title: String::new(),
            raw_text: Some(text),
            infobox: None,
            terms: Vec::new(),
            vector: Vec::new(),
        }
    }

    /// Drop the raw article body once preprocessing has produced `terms`.
    pub fn discard_raw_text(&mut self) {
        self.raw_text = None;
    }

    pub fn vector_aligned(&self) -> bool {
        self.vector.len() == self.terms.len()
    }
}

/// One row of the checkpoint log (spec §3 "PreprocessedTerms", §4.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessedRow {
    pub doc_id: DocId,
    pub title: String,
    pub terms: Vec<String>,
}
