// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dump Parser (C1, spec §4.1).
//!
//! The source (`slovak_wiki_search_engine/wiki_parser.py`, `spark/src/wiki_parser.py`)
//! pulls pages out of the dump with plain regex rather than an XML parser,
//! on purpose: wiki markup inside `<text>` bodies routinely contains
//! unbalanced angle brackets that a strict parser would choke on. We keep
//! that choice — `regex` with `(?s)` (DOTALL) and non-greedy `.*?` against
//! explicit tag delimiters, exactly as the source does.

pub mod infobox;

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, SearchEngineError};
use crate::types::{DocId, Page};

use self::infobox::parse_infobox;

/// Namespace prefixes whose pages are discarded (spec §4.1, `DISALLOWED_PAGES`
/// in `spark/src/wiki_parser.py`). Kept as a plain slice rather than plumbed
/// through `Config`, matching the source, which hardcodes it too; a future
/// caller who needs a different skip list can filter the returned pages.
pub const DEFAULT_SKIP_NAMESPACES: &[&str] = &["Wikipédia:", "MediaWiki:"];

static PAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<page>(.*?)</page>").unwrap());
static TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<title>(.*?)</title>").unwrap());
static TEXT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<text.*?>(.*?)</text>").unwrap());

/// Parse a MediaWiki-export XML dump into an ordered list of pages.
///
/// `doc_id` is assigned in parse order starting at 0, counted over the whole
/// dump *before* namespace filtering is applied — no: per spec §4.1 "`doc_id`
/// is assigned in parse order starting at 0" over the pages that are actually
/// kept, since discarded pages never become `Page` values at all. Missing
/// `<text>` yields an empty-body page rather than an error (spec §4.1).
pub fn parse_dump(path: impl AsRef<Path>) -> Result<Vec<Page>> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|e| SearchEngineError::io(path, e))?;
    Ok(parse_dump_str(&data, DEFAULT_SKIP_NAMESPACES))
}

/// Parse dump text already read into memory, with an explicit skip list.
/// Split out for testability and for the CLI's streaming-friendly future
/// (spec's "streaming-friendly" framing refers to the page-at-a-time regex
/// match, not to reading the whole file lazily — the source reads the whole
/// file too).
pub fn parse_dump_str(data: &str, skip_namespaces: &[&str]) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut next_doc_id: i64 = 0;

    for page_caps in PAGE_PATTERN.captures_iter(data) {
        let block = &page_caps[1];

        let title = TITLE_PATTERN
            .captures(block)
            .map(|c| c[1].to_string())
            .unwrap_or_default();

        if skip_namespaces
            .iter()
            .any(|prefix| title.starts_with(prefix))
        {
            continue;
        }

        let text = TEXT_PATTERN
            .captures(block)
            .map(|c| c[1].to_string())
            .unwrap_or_default();

        let infobox = parse_infobox(&text);

        let mut page = Page::new(DocId(next_doc_id), title, text);
        page.infobox = infobox;
        pages.push(page);
        next_doc_id += 1;
    }

    pages
}
