/*!
 * Language detection for note text.
 *
 * Notes are classified as French or English with a lexical score: accented
 * characters and common stop words count toward a language, and French wins
 * ties. The detector is total over all inputs and never fails.
 */

use anyhow::{Result, anyhow};
use isolang::Language;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::text_utils::split_words;

/// Characters that only show up in French text
const FRENCH_ACCENTS: &[char] = &[
    'é', 'è', 'ê', 'ë', 'à', 'â', 'ç', 'î', 'ï', 'ô', 'ö', 'û', 'ü', 'ù',
];

/// Common French words
const FRENCH_STOP_WORDS: &[&str] = &[
    "le", "la", "les", "un", "une", "des", "et", "est", "dans", "pour", "avec", "sans", "sur",
    "sous", "par", "que", "qui", "quoi", "où", "quand", "comment", "pourquoi",
];

/// Common English words
///
/// Single-letter entries never match because tokens of one character are
/// discarded before the lookup.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "is", "in", "for", "with", "without", "on", "under", "by", "that",
    "which", "what", "where", "when", "how", "why",
];

/// Weight of a single accented character
const ACCENT_WEIGHT: u32 = 2;

/// Flat bonus granted to French as soon as any French signal is present
const FRENCH_BIAS: u32 = 5;

/// Language of a note, as far as summarization is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    /// French, the default
    #[default]
    Fr,
    /// English
    En,
}

impl LanguageTag {
    /// ISO 639-1 code of the language
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
        }
    }

    /// English name of the language
    pub fn name(&self) -> &'static str {
        self.iso_language().to_name()
    }

    fn iso_language(&self) -> Language {
        match self {
            Self::Fr => Language::Fra,
            Self::En => Language::Eng,
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LanguageTag {
    type Err = anyhow::Error;

    /// Accepts ISO 639-1 and ISO 639-2 (T or B) codes, case-insensitively
    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_lowercase();

        let language = match code.len() {
            2 => Language::from_639_1(&code),
            3 => match code.as_str() {
                "fre" => Some(Language::Fra),
                _ => Language::from_639_3(&code),
            },
            _ => None,
        };

        match language {
            Some(Language::Fra) => Ok(Self::Fr),
            Some(Language::Eng) => Ok(Self::En),
            Some(other) => Err(anyhow!("Unsupported note language: {} ({})", s, other.to_name())),
            None => Err(anyhow!("Invalid language code: {}", s)),
        }
    }
}

/// Detailed outcome of a detection, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageScores {
    /// Final French score, bias included
    pub french: u32,
    /// Final English score
    pub english: u32,
    /// Detected language
    pub language: LanguageTag,
}

/// Detect the language of a text fragment
pub fn detect(text: &str) -> LanguageTag {
    detect_with_scores(text).language
}

/// Detect the language of a text fragment and report the scores behind it
pub fn detect_with_scores(text: &str) -> LanguageScores {
    if text.is_empty() {
        return LanguageScores {
            french: 0,
            english: 0,
            language: LanguageTag::Fr,
        };
    }

    let lowered = text.to_lowercase();

    let accents = lowered.chars().filter(|c| is_french_accent(*c)).count() as u32;
    let mut french = accents * ACCENT_WEIGHT;
    let mut english = 0;

    for token in split_words(&lowered) {
        let word: String = token
            .chars()
            .filter(|c| c.is_ascii_lowercase() || is_french_accent(*c))
            .collect();

        // Ignore words that are too short
        if word.chars().count() <= 1 {
            continue;
        }

        if FRENCH_STOP_WORDS.contains(&word.as_str()) {
            french += 1;
        }
        if ENGLISH_STOP_WORDS.contains(&word.as_str()) {
            english += 1;
        }
    }

    if french > 0 {
        french += FRENCH_BIAS;
    }

    let language = if french >= english {
        LanguageTag::Fr
    } else {
        LanguageTag::En
    };

    LanguageScores {
        french,
        english,
        language,
    }
}

fn is_french_accent(c: char) -> bool {
    FRENCH_ACCENTS.contains(&c)
}
