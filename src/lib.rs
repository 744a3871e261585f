// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! An end-to-end information-retrieval engine over a Slovak Wikipedia XML
//! dump: parse pages (including a structured infobox sidebar), preprocess
//! and lemmatize the text, build an inverted index with TF-IDF vectors, and
//! rank query results by cosine similarity over a boolean AND/OR candidate
//! set.
//!
//! # Architecture
//!
//! ```text
//! dump.xml ──▶ parser (C1/C2) ──▶ pipeline (C3, via parallel C5, C4 memoises)
//!                                       │
//!                                       ▼
//!                              index::InvertedIndex (C6)
//!                                       │
//!                                       ▼
//!                          vectorizer::TfIdfVectorizer (C7)
//!                                       │
//!                                       ▼
//!                              snapshot (persist index + documents)
//!                                       │
//!                                       ▼
//!                              search::SearchEngine (C8)
//! ```
//!
//! | Component | Module |
//! |-----------|--------|
//! | C1 Dump Parser | [`parser`] |
//! | C2 Infobox Parser | [`parser::infobox`] |
//! | C3 Preprocessing Pipeline | [`pipeline`] |
//! | C4 Checkpoint Store | [`checkpoint`] |
//! | C5 Parallel Executor | [`parallel`] |
//! | C6 Inverted Index | [`index`] |
//! | C7 TF-IDF Vectorizer | [`vectorizer`] |
//! | C8 Search Engine | [`search`] |

pub mod binary;
pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod corpus;
pub mod error;
pub mod index;
pub mod logging;
pub mod parallel;
pub mod parser;
pub mod pipeline;
pub mod search;
pub mod snapshot;
pub mod types;
pub mod vectorizer;

pub use builder::{build, build_in_memory};
pub use config::Config;
pub use corpus::DocumentStore;
pub use error::{Result, SearchEngineError};
pub use index::{IndexRecord, InvertedIndex};
pub use search::{BooleanOperator, SearchEngine, SearchHit};
pub use types::{DocId, Infobox, Page, PreprocessedRow};
pub use vectorizer::{InverseDocumentFrequency, TermFrequency, TfIdfVectorizer, VectorizerConfig};
