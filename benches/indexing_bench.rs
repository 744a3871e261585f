//! Criterion benchmark for the index build and search paths.
//!
//! Mirrors the teacher's `benches/search_bench.rs` shape (build a fixture
//! once, benchmark the hot operation against it) adapted to this crate's own
//! hot paths: parsing + preprocessing + vectorizing a dump, and scoring a
//! query against the resulting index.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use skwiki_search::config::{default_preprocessor_components, Config};
use skwiki_search::pipeline::Pipeline;
use skwiki_search::search::{BooleanOperator, SearchEngine};
use skwiki_search::vectorizer::VectorizerConfig;
use skwiki_search::{build_in_memory, DocumentStore, InvertedIndex};
use std::io::Write;

fn fixture_dump(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("dump.xml");
    let mut f = std::fs::File::create(&path).unwrap();
    let mut body = String::from("<mediawiki>\n");
    for i in 0..200 {
        body.push_str(&format!(
            "<page><title>Stranka{i}</title><revision><text>Slovenska wikipedia stranka cislo {i} obsahuje text o historii a geografii.</text></revision></page>\n"
        ));
    }
    body.push_str("</mediawiki>\n");
    f.write_all(body.as_bytes()).unwrap();
    path
}

fn fixture_config(dir: &std::path::Path) -> Config {
    Config {
        inverted_index_path: dir.join("index.bin"),
        sk_wikipedia_dump_path: fixture_dump(dir),
        stop_words_path: {
            let path = dir.join("stopwords.txt");
            std::fs::write(&path, "a\no\nna\nv\n").unwrap();
            path
        },
        already_processed_path: dir.join("checkpoint.jsonl"),
        preprocessor_components: default_preprocessor_components(),
        workers: 4,
        verbose: false,
        relevant_documents_count: 1000,
        sublinear_tf: false,
        smooth_idf: false,
    }
}

fn bench_build(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture_config(dir.path());

    c.bench_function("build_in_memory_200_pages", |b| {
        b.iter(|| black_box(build_in_memory(&config).unwrap()))
    });
}

fn bench_search(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture_config(dir.path());
    let (index, documents): (InvertedIndex, DocumentStore) = build_in_memory(&config).unwrap();

    let stop_words = std::sync::Arc::new(
        skwiki_search::pipeline::stopwords::load_stop_words(&config.stop_words_path).unwrap(),
    );
    let lemmatizer = std::sync::Arc::new(
        skwiki_search::pipeline::lemmatize::RuleBasedLemmatizer::default(),
    );
    let query_pipeline = Pipeline::for_query(&config.preprocessor_components, stop_words, lemmatizer);
    let vectorizer_config = VectorizerConfig::from_flags(config.sublinear_tf, config.smooth_idf);
    let engine = SearchEngine::new(
        &index,
        &documents,
        query_pipeline,
        vectorizer_config,
        config.relevant_documents_count,
    );

    c.bench_function("search_or_query", |b| {
        b.iter(|| black_box(engine.search("historia geografia", BooleanOperator::Or, 10)))
    });
}

criterion_group!(benches, bench_build, bench_search);
criterion_main!(benches);
