/*!
 * Extractive summarization.
 *
 * A summary is assembled from spans of the source text: the first sentence,
 * a sufficiently long middle sentence and the last sentence. A single
 * run-on sentence is compressed to its first and last words instead.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text_utils::{SEPARATOR_RUN_PATTERN, trim_text};

/// Texts up to this many characters are returned as is
const SHORT_TEXT_CHARS: usize = 50;

/// Run-on sentences up to this many words are returned as is
const MAX_UNCOMPRESSED_WORDS: usize = 10;

/// Words kept at each end of a compressed run-on sentence
const EDGE_WORDS: usize = 3;

/// A middle sentence must be longer than this to be kept
const MIN_MIDDLE_SENTENCE_CHARS: usize = 20;

const SENTENCE_SEPARATOR: &str = ". ";
const ELLIPSIS_SEPARATOR: &str = " ... ";

/// Runs of sentence terminators; only ASCII `.`, `!` and `?` end a sentence
static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Runs of ASCII whitespace; a no-break space does not split words
static WORD_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(SEPARATOR_RUN_PATTERN).unwrap());

/// Summarize a text by selecting sentences (or words) from it
///
/// Pure and deterministic; the same text always yields the same summary.
pub fn extractive_summarize(text: &str) -> String {
    if text.chars().count() <= SHORT_TEXT_CHARS {
        return text.to_string();
    }

    let sentences = split_segments(text, &SENTENCE_BOUNDARY);
    if sentences.len() <= 1 {
        return compress_run_on(text);
    }

    let first = trim_text(sentences[0]);
    let mut summary = String::from(first);

    if sentences.len() > 2 {
        let middle = trim_text(sentences[sentences.len() / 2]);
        if middle.chars().count() > MIN_MIDDLE_SENTENCE_CHARS {
            summary.push_str(SENTENCE_SEPARATOR);
            summary.push_str(middle);
        }
    }

    let last = trim_text(sentences[sentences.len() - 1]);
    if last != first {
        summary.push_str(SENTENCE_SEPARATOR);
        summary.push_str(last);
    }

    trim_text(&summary).to_string()
}

/// Keep the first and last words of a single long sentence
fn compress_run_on(text: &str) -> String {
    let words = split_segments(text, &WORD_BOUNDARY);
    if words.len() <= MAX_UNCOMPRESSED_WORDS {
        return text.to_string();
    }

    format!(
        "{}{}{}",
        words[..EDGE_WORDS].join(" "),
        ELLIPSIS_SEPARATOR,
        words[words.len() - EDGE_WORDS..].join(" ")
    )
}

/// Split `text` on `boundary`
///
/// A text without any boundary is a single segment. An empty leading
/// segment (text starting with a boundary) is kept, trailing empty segments
/// are dropped. Segment indices, and therefore which sentence counts as the
/// middle or the last one, depend on this exact behavior.
fn split_segments<'a>(text: &'a str, boundary: &Regex) -> Vec<&'a str> {
    if !boundary.is_match(text) {
        return vec![text];
    }

    let mut segments: Vec<&str> = boundary.split(text).collect();
    while segments.last().is_some_and(|segment| segment.is_empty()) {
        segments.pop();
    }

    segments
}
