//! Sentence splitting and overlap extraction

use crate::util::{char_len, tail_chars};
use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

static RE_TERMINATOR_RUN: OnceLock<Regex> = OnceLock::new();
static RE_SENTENCE_BOUNDARY: OnceLock<Regex> = OnceLock::new();

fn terminator_run_re() -> &'static Regex {
    RE_TERMINATOR_RUN.get_or_init(|| Regex::new(r"[.!?]+\s+").expect("valid terminator regex"))
}

fn sentence_boundary_re() -> &'static Regex {
    RE_SENTENCE_BOUNDARY.get_or_init(|| Regex::new(r"[.!?]\s+").expect("valid boundary regex"))
}

/// Split text into trimmed sentences.
///
/// A sentence ends at a run of `.`, `!` or `?` followed by whitespace and
/// keeps its terminator. Trailing text without a terminator is a sentence
/// of its own.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in terminator_run_re().find_iter(text) {
        let sentence = text[start..m.end()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = m.end();
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }

    sentences
}

/// Cut a sentence longer than `max_chars` at word boundaries.
///
/// Pieces never exceed `max_chars` unless a single word does.
pub fn split_oversized(sentence: &str, max_chars: usize) -> Vec<&str> {
    if char_len(sentence) <= max_chars {
        return vec![sentence];
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    let mut len = 0;

    for (idx, word) in sentence.split_word_bound_indices() {
        let word_len = char_len(word);
        if len + word_len > max_chars && len > 0 {
            let piece = sentence[start..idx].trim();
            if !piece.is_empty() {
                pieces.push(piece);
            }
            start = idx;
            len = 0;
        }
        len += word_len;
    }

    let rest = sentence[start..].trim();
    if !rest.is_empty() {
        pieces.push(rest);
    }

    pieces
}

/// Text carried from the end of a closed chunk into the next one.
///
/// Takes the trailing `overlap_chars` characters and, when a sentence
/// boundary occurs inside that slice, starts right after the first one so
/// the next chunk does not open mid-sentence.
pub fn overlap_fragment(text: &str, overlap_chars: usize) -> &str {
    if overlap_chars == 0 {
        return "";
    }
    if char_len(text) <= overlap_chars {
        return text;
    }

    let tail = tail_chars(text, overlap_chars);
    match sentence_boundary_re().find(tail) {
        Some(m) => &tail[m.end()..],
        None => tail,
    }
}
