//! Best-effort extraction of JSON payloads from free-text completions.
//!
//! The completion service is asked to answer with a fenced ```json block,
//! but nothing guarantees it will. Policy: prefer a fenced block, then fall
//! back to the first balanced `{...}` or `[...]` in the raw text that parses
//! as JSON. Fenced candidates are handed to the caller unparsed so each
//! stage can report its own invalid-JSON failure.

use regex::Regex;
use std::sync::OnceLock;

fn fenced_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").unwrap())
}

fn fenced_block(text: &str) -> Option<&str> {
    fenced_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Returns the first region that is balanced from some occurrence of `open`
/// and parses as JSON. Prose ahead of the payload can contain stray braces
/// or unpaired quotes, so every occurrence of `open` is tried as a fresh
/// candidate start rather than trusting the first one.
fn balanced_region(text: &str, open: char, close: char) -> Option<&str> {
    let mut search_from = 0;
    while let Some(found) = text[search_from..].find(open) {
        let start = search_from + found;
        if let Some(region) = balanced_from(&text[start..], open, close) {
            if serde_json::from_str::<serde_json::Value>(region).is_ok() {
                return Some(region);
            }
        }
        search_from = start + open.len_utf8();
    }
    None
}

/// Scans from the leading `open` to its matching `close`, skipping brackets
/// inside string literals.
fn balanced_from(text: &str, open: char, close: char) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[..offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Locates a JSON object in the completion text.
pub fn extract_object(text: &str) -> Option<&str> {
    if let Some(block) = fenced_block(text) {
        if block.starts_with('{') {
            return Some(block);
        }
    }
    balanced_region(text, '{', '}')
}

/// Locates a JSON list in the completion text.
pub fn extract_array(text: &str) -> Option<&str> {
    if let Some(block) = fenced_block(text) {
        if block.starts_with('[') {
            return Some(block);
        }
    }
    balanced_region(text, '[', ']')
}
