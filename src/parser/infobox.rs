// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Infobox Parser (C2, spec §4.2).
//!
//! The source expresses the attribute-value grammar as one gnarly regex:
//! `\|\s*([^=]+?)\s*=\s*((?:<[^<>]*>|\[\[(?:(?!\]\]).)*\]\]|{{(?:(?!}}).)*}}|[^|{}\[\]<>]+)+)`
//! (`wiki_parser.py`). Rust's `regex` crate is a non-backtracking automaton
//! and has no lookaround (`(?!...)`), so that exact pattern can't compile
//! here. We implement the same grammar as a small depth-tracking scanner
//! instead: split the infobox body on `|` only when not nested inside a
//! template (`{{…}}`), a link (`[[…]]`), or an inline tag (`<…>`), which is
//! the behavior the lookaround was emulating. This also fixes a latent bug
//! in the source's *outer* match (`{{Infobox(.*?)[\n|](.*?)}}` is non-greedy
//! and stops at the first `}}`, even one that belongs to a nested template
//! used as an attribute value) — we track brace depth for the outer close
//! too, so a `{{Citation|...}}` value doesn't truncate the infobox early.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Infobox;

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(?:(.+?)\|)?(.+?)\]\]").unwrap());
static ESCAPED_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)&lt;.*?&gt;").unwrap());

/// Parse the first `{{Infobox ...}}` block in `text`, if any (policy: only
/// the first is retained when multiple occur — spec §4.2).
pub fn parse_infobox(text: &str) -> Option<Infobox> {
    let start = text.find("{{Infobox")?;
    let body = &text[start + 2..]; // skip the opening "{{"; "Infobox..." follows

    let (raw_segments, _consumed) = split_block(body)?;
    let mut segments = raw_segments.into_iter();

    let name_segment = segments.next()?;
    let name_raw = match name_segment.find(['\n']) {
        Some(idx) => &name_segment[..idx],
        None => &name_segment[..],
    };
    // Strip the leading "Infobox" keyword (and following whitespace).
    let name_raw = name_raw.strip_prefix("Infobox").unwrap_or(name_raw);
    let name = normalize_name(name_raw);

    let mut properties = Vec::new();
    for segment in segments {
        let Some((key, value)) = split_top_level(&segment, '=') else {
            continue;
        };
        let key = key.trim().to_string();
        let value = clean_value(value.trim());
        if key.is_empty() || value.is_empty() {
            continue;
        }
        properties.push((key, value));
    }

    if properties.is_empty() {
        None
    } else {
        Some(Infobox { name, properties })
    }
}

/// Split the infobox body (everything after the opening `{{`) into
/// `|`-delimited segments, stopping at the balanced outer `}}`.
///
/// Returns `(segments, bytes_consumed)`, or `None` if the block never
/// closes (malformed dump — treated as "no infobox here", per spec §7
/// MalformedRecord policy: skip and continue).
fn split_block(body: &str) -> Option<(Vec<String>, usize)> {
    let chars: Vec<char> = body.chars().collect();
    let mut segments = Vec::new();
    let mut current = String::new();

    let mut brace_depth = 1i32; // we're already inside the opening "{{"
    let mut bracket_depth = 0i32;
    let mut in_tag = false;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];

        if !in_tag && bracket_depth == 0 && brace_depth == 1 && c == '|' {
            segments.push(std::mem::take(&mut current));
            i += 1;
            continue;
        }

        if c == '{' && chars.get(i + 1) == Some(&'{') {
            brace_depth += 1;
            current.push('{');
            current.push('{');
            i += 2;
            continue;
        }
        if c == '}' && chars.get(i + 1) == Some(&'}') {
            brace_depth -= 1;
            if brace_depth == 0 {
                segments.push(current);
                return Some((segments, i + 2));
            }
            current.push('}');
            current.push('}');
            i += 2;
            continue;
        }
        if !in_tag && c == '[' && chars.get(i + 1) == Some(&'[') {
            bracket_depth += 1;
            current.push('[');
            current.push('[');
            i += 2;
            continue;
        }
        if !in_tag && bracket_depth > 0 && c == ']' && chars.get(i + 1) == Some(&']') {
            bracket_depth -= 1;
            current.push(']');
            current.push(']');
            i += 2;
            continue;
        }
        if c == '<' && !in_tag {
            in_tag = true;
            current.push(c);
            i += 1;
            continue;
        }
        if c == '>' && in_tag {
            in_tag = false;
            current.push(c);
            i += 1;
            continue;
        }

        current.push(c);
        i += 1;
    }

    // Ran off the end without a balanced close: malformed block.
    None
}

/// Split on the first top-level `delim` (not nested inside `{{}}`, `[[]]`,
/// or `<>`). Used to split an attribute segment into `key`/`value` on `=`.
fn split_top_level(s: &str, delim: char) -> Option<(String, String)> {
    let chars: Vec<char> = s.chars().collect();
    let mut brace_depth = 0i32;
    let mut bracket_depth = 0i32;
    let mut in_tag = false;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];

        if !in_tag && brace_depth == 0 && bracket_depth == 0 && c == delim {
            let before: String = chars[..i].iter().collect();
            let after: String = chars[i + 1..].iter().collect();
            return Some((before, after));
        }

        if c == '{' && chars.get(i + 1) == Some(&'{') {
            brace_depth += 1;
            i += 2;
            continue;
        }
        if c == '}' && chars.get(i + 1) == Some(&'}') && brace_depth > 0 {
            brace_depth -= 1;
            i += 2;
            continue;
        }
        if !in_tag && c == '[' && chars.get(i + 1) == Some(&'[') {
            bracket_depth += 1;
            i += 2;
            continue;
        }
        if !in_tag && bracket_depth > 0 && c == ']' && chars.get(i + 1) == Some(&']') {
            bracket_depth -= 1;
            i += 2;
            continue;
        }
        if c == '<' && !in_tag {
            in_tag = true;
        } else if c == '>' && in_tag {
            in_tag = false;
        }

        i += 1;
    }

    None
}

/// Trim; title-case; keep only the first two whitespace-delimited words,
/// concatenated; then strip everything but alphanumerics (spec §4.2).
fn normalize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let words: Vec<&str> = trimmed.split_whitespace().take(2).collect();
    let titled: String = words.iter().map(|w| title_case_word(w)).collect();
    titled.chars().filter(|c| c.is_alphanumeric()).collect()
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>()
                + &chars.flat_map(|c| c.to_lowercase()).collect::<String>()
        }
        None => String::new(),
    }
}

/// Collapse `[[link|text]]`/`[[text]]` to `text`, strip `&lt;...&gt;`-escaped
/// inline tags, and unescape `&amp;amp;` → `&` (spec §4.2 plus the
/// `spark/src/wiki_parser.py` escaped-tag cleanup this spec carries forward).
fn clean_value(raw: &str) -> String {
    let collapsed = LINK_PATTERN.replace_all(raw, "$2");
    let stripped = ESCAPED_TAG_PATTERN.replace_all(&collapsed, "");
    stripped.replace("&amp;amp;", "&").trim().to_string()
}
