//! Keyword and script-range classifier.
//!
//! Two passes over the input:
//!
//! 1. Keyword pass over the lower-cased text. Languages are scanned in
//!    [`KEYWORD_TABLE`] order and the first language with any keyword
//!    occurring as a substring wins.
//! 2. Script pass over the raw text. Every entry of [`SCRIPT_RANGES`] that has
//!    at least one character in range is a match, and the LAST matching entry
//!    wins. A script match always replaces the keyword result.

use super::{Language, LanguageTag};

/// Transliterated keywords, in scan order.
pub const KEYWORD_TABLE: &[(Language, &[&str])] = &[
    (
        Language::Hindi,
        &[
            "namaste", "dhanyawad", "kaise", "kya", "hai", "main", "aap", "theek", "baat",
            "ghar", "paani", "khana",
        ],
    ),
    (
        Language::Punjabi,
        &["sat sri akal", "kiddan", "tussi", "main", "kya gal"],
    ),
    (Language::Bengali, &["namaskar", "kemon acho", "ami"]),
    (
        Language::Tamil,
        &["vanakkam", "eppadi irukkireenga", "naan"],
    ),
    (Language::Telugu, &["namaskaram", "ela unnaru", "nenu"]),
    (Language::Marathi, &["namaskar", "kasa ahat", "mi"]),
    (Language::Gujarati, &["namaste", "kem cho", "hu"]),
    (Language::Kannada, &["namaskara", "hege iddira", "naanu"]),
    (Language::Malayalam, &["namaskaram", "sukhamano", "njan"]),
    (Language::Odia, &["namaskar", "kemiti achanti", "mu"]),
];

/// A contiguous Unicode block associated with one language.
#[derive(Debug, Clone, Copy)]
pub struct ScriptRange {
    pub language: Language,
    pub script: &'static str,
    pub start: char,
    pub end: char,
}

impl ScriptRange {
    pub fn contains(&self, c: char) -> bool {
        (self.start..=self.end).contains(&c)
    }
}

/// Script ranges in evaluation order; later entries take precedence.
///
/// Marathi shares Devanagari with Hindi and has no entry of its own.
pub const SCRIPT_RANGES: &[ScriptRange] = &[
    ScriptRange {
        language: Language::Hindi,
        script: "Devanagari",
        start: '\u{0900}',
        end: '\u{097F}',
    },
    ScriptRange {
        language: Language::Punjabi,
        script: "Gurmukhi",
        start: '\u{0A00}',
        end: '\u{0A7F}',
    },
    ScriptRange {
        language: Language::Bengali,
        script: "Bengali",
        start: '\u{0980}',
        end: '\u{09FF}',
    },
    ScriptRange {
        language: Language::Tamil,
        script: "Tamil",
        start: '\u{0B80}',
        end: '\u{0BFF}',
    },
    ScriptRange {
        language: Language::Telugu,
        script: "Telugu",
        start: '\u{0C00}',
        end: '\u{0C7F}',
    },
    ScriptRange {
        language: Language::Gujarati,
        script: "Gujarati",
        start: '\u{0A80}',
        end: '\u{0AFF}',
    },
    ScriptRange {
        language: Language::Kannada,
        script: "Kannada",
        start: '\u{0C80}',
        end: '\u{0CFF}',
    },
    ScriptRange {
        language: Language::Malayalam,
        script: "Malayalam",
        start: '\u{0D00}',
        end: '\u{0D7F}',
    },
    ScriptRange {
        language: Language::Odia,
        script: "Odia",
        start: '\u{0B00}',
        end: '\u{0B7F}',
    },
];

/// Classify `text`. Total over all input; empty text is `Unknown`.
pub fn detect(text: &str) -> LanguageTag {
    if let Some(range) = SCRIPT_RANGES
        .iter()
        .rev()
        .find(|range| text.chars().any(|c| range.contains(c)))
    {
        return LanguageTag::Native(range.language);
    }

    detect_keyword(text)
        .map(LanguageTag::Romanized)
        .unwrap_or(LanguageTag::Unknown)
}

fn detect_keyword(text: &str) -> Option<Language> {
    let lowered = text.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .find(|(_, words)| words.iter().any(|word| lowered.contains(word)))
        .map(|(lang, _)| *lang)
}
