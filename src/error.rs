//! Error kinds for the search engine (spec §7).
//!
//! Only config/IO failures are fatal. Everything else is recovered at the
//! smallest granularity that preserves the rest of the batch: a malformed
//! page or checkpoint row is skipped, a missing query term is dropped from
//! the active query, a worker's partial results are discarded.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchEngineError {
    /// Config/IO errors: missing file, bad path. Fatal at startup.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    /// A record (dump page, infobox attribute, checkpoint row) failed to
    /// parse. Non-fatal: the caller skips the record and continues.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A query term is absent from the inverted index. Non-fatal: the
    /// caller drops the term from the active query.
    #[error("term not in corpus: {0}")]
    MissingTerm(String),

    /// A parallel worker task failed. Non-fatal: the worker's partial
    /// results are discarded and the build continues with the rest.
    #[error("worker failed: {0}")]
    WorkerFault(String),

    /// The query string had no terms after preprocessing, or no argument
    /// was supplied at all. Reported to the user; non-zero exit.
    #[error("query is empty")]
    EmptyQuery,

    #[error("corrupt index file: {0}")]
    CorruptIndex(String),
}

pub type Result<T> = std::result::Result<T, SearchEngineError>;

impl SearchEngineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SearchEngineError::Io {
            path: path.into(),
            source,
        }
    }
}
