//! Shared fixtures for crate-level integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use skwiki_search::config::{default_preprocessor_components, Config};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
}

/// A small but not-trivial Slovak Wikipedia-style dump: a couple of pages
/// that share vocabulary (so AND/OR candidate sets are non-degenerate), one
/// with an infobox, one namespaced page that must be filtered out.
pub fn sample_dump(dir: &Path) -> PathBuf {
    write_file(
        dir,
        "dump.xml",
        r#"<mediawiki>
<page>
<title>Wikipédia:O projekte</title>
<revision><text>Stránka o projekte, nemá byť indexovaná.</text></revision>
</page>
<page>
<title>Rusko</title>
<revision><text>{{Infobox štát
| hlavné mesto = Moskva
| mena = rubeľ
}}
Rusko je najväčší štát na svete podľa rozlohy. Prezidentom Ruska je Vladimír Putin.</text></revision>
</page>
<page>
<title>Vladimír Vladimirovič Putin</title>
<revision><text>Vladimír Putin je prezident Ruskej federácie od roku 2012.</text></revision>
</page>
<page>
<title>Bratislava</title>
<revision><text>Bratislava je hlavné mesto Slovenska, ktoré leží na rieke Dunaj.</text></revision>
</page>
</mediawiki>"#,
    )
}

pub fn sample_stop_words(dir: &Path) -> PathBuf {
    write_file(
        dir,
        "stopwords.txt",
        "je\nna\nna\nod\nktoré\npodľa\na\ns\nza\nju\n",
    )
}

pub fn sample_config(dir: &Path) -> Config {
    Config {
        inverted_index_path: dir.join("index.bin"),
        sk_wikipedia_dump_path: sample_dump(dir),
        stop_words_path: sample_stop_words(dir),
        already_processed_path: dir.join("checkpoint.jsonl"),
        preprocessor_components: default_preprocessor_components(),
        workers: 2,
        verbose: false,
        relevant_documents_count: 1000,
        sublinear_tf: false,
        smooth_idf: false,
    }
}
