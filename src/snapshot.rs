// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Persisted index layout (spec §6): "an opaque self-describing blob
//! containing: the term -> IndexRecord map, `documents_count`, and
//! per-document (doc_id, title, terms, vector, optional infobox) so that
//! search can reconstruct candidate pages without re-reading the dump" — one
//! file, not two. [`crate::index::InvertedIndex`] and [`crate::corpus::DocumentStore`]
//! are the in-memory halves; this module is the single `save`/`load` pair
//! the spec's external-interface table actually describes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::binary::codec;
use crate::corpus::DocumentStore;
use crate::error::Result;
use crate::index::InvertedIndex;
use crate::types::Page;

#[derive(Serialize, Deserialize)]
struct Bundle {
    index: InvertedIndex,
    documents: Vec<Page>,
}

pub fn save(path: impl AsRef<Path>, index: &InvertedIndex, documents: &DocumentStore) -> Result<()> {
    let bundle = Bundle {
        index: index.clone(),
        documents: documents.iter().cloned().collect(),
    };
    codec::save_snapshot(path.as_ref(), &bundle)
}

pub fn load(path: impl AsRef<Path>) -> Result<(InvertedIndex, DocumentStore)> {
    let bundle: Bundle = codec::load_snapshot(path.as_ref())?;
    Ok((bundle.index, DocumentStore::from_pages(bundle.documents)))
}
