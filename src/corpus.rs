// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The owned `doc_id -> Page` table (spec §9 Design Notes: "store only
//! `doc_id` in postings... resolve to a page via a single owned `doc_id ->
//! Page` table held by the index. Pages are owned by that table; postings
//! hold indices.").
//!
//! Kept by `doc_id` rather than by list position: spec §5 "Ordering
//! guarantees" permits a final shuffle of the merged document list for
//! downstream sampling, which would otherwise desynchronize a plain `Vec`
//! index from `doc_id`.

use std::collections::HashMap;
use std::path::Path;

use crate::binary::codec;
use crate::error::Result;
use crate::types::{DocId, Page};

#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    by_id: HashMap<DocId, Page>,
}

impl DocumentStore {
    pub fn from_pages(pages: Vec<Page>) -> Self {
        DocumentStore {
            by_id: pages.into_iter().map(|p| (p.doc_id, p)).collect(),
        }
    }

    pub fn get(&self, doc_id: DocId) -> Option<&Page> {
        self.by_id.get(&doc_id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.by_id.values()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let pages: Vec<&Page> = self.by_id.values().collect();
        codec::save_documents(path.as_ref(), &owned(pages))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let pages = codec::load_documents(path.as_ref())?;
        Ok(DocumentStore::from_pages(pages))
    }
}

fn owned(pages: Vec<&Page>) -> Vec<Page> {
    pages.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_doc_id_is_independent_of_insertion_order() {
        let p0 = Page::new(DocId(0), "A".to_string(), String::new());
        let p1 = Page::new(DocId(1), "B".to_string(), String::new());
        // Simulates a post-merge shuffle: doc_id 1 appears before doc_id 0.
        let store = DocumentStore::from_pages(vec![p1, p0]);
        assert_eq!(store.get(DocId(0)).unwrap().title, "A");
        assert_eq!(store.get(DocId(1)).unwrap().title, "B");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.bin");
        let mut p = Page::new(DocId(0), "Title".to_string(), String::new());
        p.terms = vec!["a".to_string()];
        p.vector = vec![1.0];
        let store = DocumentStore::from_pages(vec![p]);
        store.save(&path).unwrap();

        let reloaded = DocumentStore::load(&path).unwrap();
        assert_eq!(reloaded.get(DocId(0)).unwrap().title, "Title");
    }
}
