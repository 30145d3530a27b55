/*!
 * Whitespace rules shared by detection, summarization and cache keys.
 *
 * Only ASCII whitespace separates words. A no-break space (U+00A0), common
 * before `:` `;` `!` `?` in French, belongs to the word around it.
 */

/// Regex fragment for one run of word separators
pub const SEPARATOR_RUN_PATTERN: &str = r"(?-u:\s)+";

/// Whether `c` separates words: space, tab, line feed, vertical tab, form feed
/// or carriage return
pub fn is_word_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Trim leading and trailing control characters and spaces (`<= U+0020`)
pub fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c <= ' ')
}

/// Whether the text is empty once trimmed
pub fn is_blank(text: &str) -> bool {
    trim_text(text).is_empty()
}

/// Non-empty words of `text`, split on ASCII whitespace
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_word_separator).filter(|word| !word.is_empty())
}
