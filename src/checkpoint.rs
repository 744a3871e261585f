// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Checkpoint Store (C4, spec §4.4).
//!
//! A row-append log keyed by document title. Loaded once as `title ->
//! terms` on pipeline entry; documents whose title is already present
//! bypass preprocessing entirely. Concurrent appends are serialized with a
//! `parking_lot::Mutex` (the teacher's own choice for its checkpoint-style
//! shared-file writer, see `src/binary/incremental.rs`), since the checkpoint
//! is the one resource spec §5 calls out as shared and mutable during the
//! parallel preprocessing phase.
//!
//! Rows are newline-delimited JSON (`(doc_id, title, terms)` objects) rather
//! than Python list literals parsed with `ast.literal_eval` — "deserializing
//! the stored list literal safely" (spec §4.4) is exactly what a schema'd
//! `serde_json` row gives us for free, so we use the dependency already in
//! the teacher's own stack instead of inventing a bespoke literal parser.
//! The checkpoint is advisory, not authoritative (spec §4.4): a malformed
//! row is skipped with a warning, never a fatal error.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::warn;

use crate::error::{Result, SearchEngineError};
use crate::types::{DocId, PreprocessedRow};

pub struct CheckpointStore {
    path: PathBuf,
    cache: HashMap<String, Vec<String>>,
    writer: Mutex<()>,
}

impl CheckpointStore {
    /// Load the checkpoint file if it exists. Absence means "reprocess
    /// everything" (spec §4.4), not an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut cache = HashMap::new();

        if path.exists() {
            let file = File::open(&path).map_err(|e| SearchEngineError::io(&path, e))?;
            for (line_no, line) in BufReader::new(file).lines().enumerate() {
                let line = line.map_err(|e| SearchEngineError::io(&path, e))?;
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<PreprocessedRow>(&line) {
                    Ok(row) => {
                        cache.insert(row.title, row.terms);
                    }
                    Err(e) => {
                        warn!(line_no, error = %e, "skipping malformed checkpoint row");
                    }
                }
            }
        }

        Ok(CheckpointStore {
            path,
            cache,
            writer: Mutex::new(()),
        })
    }

    pub fn lookup(&self, title: &str) -> Option<Vec<String>> {
        self.cache.get(title).cloned()
    }

    /// Append one row. Serialized via the shared mutex so concurrent
    /// workers never interleave partial writes (spec §5).
    pub fn append(&self, doc_id: DocId, title: &str, terms: &[String]) -> Result<()> {
        let row = PreprocessedRow {
            doc_id,
            title: title.to_string(),
            terms: terms.to_vec(),
        };
        let line = serde_json::to_string(&row)
            .map_err(|e| SearchEngineError::MalformedRecord(e.to_string()))?;

        let _guard = self.writer.lock();
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SearchEngineError::io(parent, e))?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| SearchEngineError::io(&self.path, e))?;
        writeln!(file, "{line}").map_err(|e| SearchEngineError::io(&self.path, e))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_checkpoint_file_is_not_an_error() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::open(dir.path().join("missing.jsonl")).unwrap();
        assert!(store.lookup("anything").is_none());
    }

    #[test]
    fn append_then_reopen_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("checkpoint.jsonl");
        {
            let store = CheckpointStore::open(&path).unwrap();
            store
                .append(DocId(0), "Title", &["a".to_string(), "b".to_string()])
                .unwrap();
        }
        let reopened = CheckpointStore::open(&path).unwrap();
        assert_eq!(
            reopened.lookup("Title"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn malformed_row_is_skipped_not_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("checkpoint.jsonl");
        std::fs::write(&path, "not json\n{\"doc_id\":1,\"title\":\"T\",\"terms\":[\"x\"]}\n").unwrap();
        let store = CheckpointStore::open(&path).unwrap();
        assert_eq!(store.lookup("T"), Some(vec!["x".to_string()]));
    }

    #[test]
    fn concurrent_appends_are_serialized() {
        use std::sync::Arc;
        use std::thread;

        let dir = tempdir().unwrap();
        let store = Arc::new(CheckpointStore::open(dir.path().join("checkpoint.jsonl")).unwrap());
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                store
                    .append(DocId(i), &format!("Title{i}"), &["t".to_string()])
                    .unwrap();
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        let reopened = CheckpointStore::open(store.path()).unwrap();
        for i in 0..8 {
            assert!(reopened.lookup(&format!("Title{i}")).is_some());
        }
    }
}
