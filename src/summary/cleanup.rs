/*!
 * Display cleanup for summaries.
 *
 * Strips introductory phrases such as "Voici :" or "Here is the summary:"
 * and normalizes whitespace. Applied before display, never on the cache path.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text_utils::{SEPARATOR_RUN_PATTERN, trim_text};

/// "Voici ...:", "Here is ...:" and friends, up to the first colon
static LEADING_INTRODUCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(voici|here is|here's|this is|aquí está|hier ist|ecco|resumen|zusammenfassung).*?:(?-u:\s)*").unwrap()
});

/// "Le texte ...", "The text ..." up to the next whitespace
static LEADING_TEXT_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(le texte|the text|el texto|der text).*?(?-u:\s)").unwrap()
});

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(SEPARATOR_RUN_PATTERN).unwrap());

/// Clean a summary for display
///
/// Idempotent: cleaning an already clean summary returns it unchanged.
pub fn clean_summary(summary: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(summary, " ");

    let mut rest = trim_text(&collapsed);
    while let Some(stripped) = strip_leading_phrase(rest) {
        rest = stripped.trim_start_matches(|c: char| c <= ' ');
    }

    trim_text(rest).to_string()
}

fn strip_leading_phrase(text: &str) -> Option<&str> {
    [&*LEADING_INTRODUCTION, &*LEADING_TEXT_REFERENCE]
        .iter()
        .find_map(|pattern| pattern.find(text).map(|found| &text[found.end()..]))
}
