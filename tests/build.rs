//! Crate-level integration test for the full index-build pipeline (spec §2
//! "Data flow at index build", §8 "Testable properties").

mod common;

use skwiki_search::{builder, snapshot};

#[test]
fn namespaced_pages_are_filtered_and_everything_else_is_indexed() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::sample_config(dir.path());

    let (index, documents) = builder::build(&config).unwrap();

    // "Wikipédia:O projekte" is filtered by the namespace skip list (spec §4.1).
    assert_eq!(documents.len(), 3);
    assert_eq!(index.documents_count(), 3);

    let rusko = documents
        .iter()
        .find(|p| p.title == "Rusko")
        .expect("Rusko page present");
    assert!(rusko.infobox.is_some(), "Rusko should carry a parsed infobox");
    let infobox = rusko.infobox.as_ref().unwrap();
    assert_eq!(infobox.name, "Štát");
    assert_eq!(infobox.get("hlavné mesto"), Some("Moskva"));
}

#[test]
fn every_page_vector_is_aligned_with_its_terms() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::sample_config(dir.path());
    let (_, documents) = builder::build(&config).unwrap();

    for page in documents.iter() {
        assert_eq!(
            page.vector.len(),
            page.terms.len(),
            "vector/terms misaligned for {}",
            page.title
        );
    }
}

#[test]
fn index_invariants_hold_after_a_full_build() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::sample_config(dir.path());
    let (index, documents) = builder::build(&config).unwrap();

    let mut union_docs = std::collections::HashSet::new();
    for term in index.terms() {
        let record = index.get(term).unwrap();
        assert_eq!(
            record.document_frequency as usize,
            record.documents.len(),
            "document_frequency must equal |documents| for {term}"
        );
        assert!(
            record.corpus_frequency >= record.document_frequency,
            "corpus_frequency must be >= document_frequency for {term}"
        );
        union_docs.extend(record.documents.iter().copied());
    }
    // Every document with at least one surviving term appears in some posting.
    let non_empty_docs = documents.iter().filter(|p| !p.terms.is_empty()).count();
    assert_eq!(union_docs.len(), non_empty_docs);
}

#[test]
fn persisted_snapshot_round_trips_losslessly() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::sample_config(dir.path());
    let (index, documents) = builder::build(&config).unwrap();

    let (reloaded_index, reloaded_documents) = snapshot::load(&config.inverted_index_path).unwrap();

    assert_eq!(reloaded_index.documents_count(), index.documents_count());
    assert_eq!(reloaded_index.vocabulary_size(), index.vocabulary_size());
    assert_eq!(reloaded_documents.len(), documents.len());

    for term in index.terms() {
        let original = index.get(term).unwrap();
        let reloaded = reloaded_index.get(term).unwrap();
        assert_eq!(original.document_frequency, reloaded.document_frequency);
        assert_eq!(original.corpus_frequency, reloaded.corpus_frequency);
        assert_eq!(original.documents, reloaded.documents);
    }
}

#[test]
fn rebuilding_over_the_same_checkpoint_skips_preprocessing() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::sample_config(dir.path());

    let (first_index, first_documents) = builder::build(&config).unwrap();
    let (second_index, second_documents) = builder::build(&config).unwrap();

    assert_eq!(first_index.documents_count(), second_index.documents_count());
    assert_eq!(first_documents.len(), second_documents.len());
    for page in first_documents.iter() {
        let reprocessed = second_documents.get(page.doc_id).unwrap();
        assert_eq!(page.terms, reprocessed.terms);
    }
}

#[test]
fn empty_dump_yields_an_empty_index() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::sample_config(dir.path());
    std::fs::write(&config.sk_wikipedia_dump_path, "<mediawiki></mediawiki>").unwrap();
    config.already_processed_path = dir.path().join("empty_checkpoint.jsonl");

    let (index, documents) = builder::build(&config).unwrap();
    assert_eq!(index.documents_count(), 0);
    assert!(documents.is_empty());
}
