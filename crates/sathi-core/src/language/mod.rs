//! Language detection for Indian languages
//!
//! Classifies free text into a [`LanguageTag`] using transliterated keyword
//! matches and Unicode script ranges, and maps each tag to the instruction
//! sentence injected into the system prompt.

mod detector;

pub use detector::{KEYWORD_TABLE, SCRIPT_RANGES, ScriptRange, detect};

use serde::{Deserialize, Serialize};

/// Instruction used when no language could be identified.
pub const GENERIC_LANGUAGE_INSTRUCTION: &str =
    "Detect the user's language and respond in the EXACT same language and script they are using.";

/// Languages the detector knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Hindi,
    Punjabi,
    Bengali,
    Tamil,
    Telugu,
    Marathi,
    Gujarati,
    Kannada,
    Malayalam,
    Odia,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hindi => "hindi",
            Self::Punjabi => "punjabi",
            Self::Bengali => "bengali",
            Self::Tamil => "tamil",
            Self::Telugu => "telugu",
            Self::Marathi => "marathi",
            Self::Gujarati => "gujarati",
            Self::Kannada => "kannada",
            Self::Malayalam => "malayalam",
            Self::Odia => "odia",
        }
    }

    /// Capitalised English name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Hindi => "Hindi",
            Self::Punjabi => "Punjabi",
            Self::Bengali => "Bengali",
            Self::Tamil => "Tamil",
            Self::Telugu => "Telugu",
            Self::Marathi => "Marathi",
            Self::Gujarati => "Gujarati",
            Self::Kannada => "Kannada",
            Self::Malayalam => "Malayalam",
            Self::Odia => "Odia",
        }
    }

    /// Script named in the reply instruction. `None` for languages that get
    /// the generic instruction.
    fn instruction_script(&self) -> Option<&'static str> {
        match self {
            Self::Hindi => Some("Hindi देवनागरी"),
            Self::Punjabi => Some("Punjabi Gurmukhi"),
            Self::Bengali => Some("Bengali"),
            Self::Tamil => Some("Tamil"),
            Self::Telugu => Some("Telugu"),
            Self::Odia => Some("Odia"),
            Self::Marathi | Self::Gujarati | Self::Kannada | Self::Malayalam => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detector output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageTag {
    /// Matched through a transliterated Latin keyword
    Romanized(Language),
    /// Matched through a character in the language's native script
    Native(Language),
    Unknown,
}

impl LanguageTag {
    pub fn language(&self) -> Option<Language> {
        match self {
            Self::Romanized(lang) | Self::Native(lang) => Some(*lang),
            Self::Unknown => None,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native(_))
    }

    /// Stable identifier, e.g. `hindi`, `tamil_native`, `unknown`
    pub fn as_string(&self) -> String {
        match self {
            Self::Romanized(lang) => lang.as_str().to_string(),
            Self::Native(lang) => format!("{}_native", lang.as_str()),
            Self::Unknown => "unknown".to_string(),
        }
    }

    /// Instruction sentence telling the model which language and script to answer in.
    ///
    /// Romanized and native input map to the same instruction. Marathi,
    /// Gujarati, Kannada and Malayalam are detected but answered with the
    /// generic instruction.
    pub fn instruction(&self) -> String {
        let Some((lang, script)) = self
            .language()
            .and_then(|lang| lang.instruction_script().map(|script| (lang, script)))
        else {
            return GENERIC_LANGUAGE_INSTRUCTION.to_string();
        };

        format!(
            "CRITICAL: User is speaking {}. Respond ONLY in proper {} script.",
            lang.display_name().to_uppercase(),
            script
        )
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_identifiers() {
        assert_eq!(LanguageTag::Romanized(Language::Hindi).as_string(), "hindi");
        assert_eq!(
            LanguageTag::Native(Language::Malayalam).to_string(),
            "malayalam_native"
        );
        assert_eq!(LanguageTag::Unknown.as_string(), "unknown");
    }

    #[test]
    fn test_hindi_instruction_mandates_devanagari() {
        let instruction = LanguageTag::Romanized(Language::Hindi).instruction();
        assert_eq!(
            instruction,
            "CRITICAL: User is speaking HINDI. Respond ONLY in proper Hindi देवनागरी script."
        );
        assert_eq!(
            LanguageTag::Native(Language::Hindi).instruction(),
            instruction
        );
    }

    #[test]
    fn test_script_named_instructions() {
        assert_eq!(
            LanguageTag::Native(Language::Punjabi).instruction(),
            "CRITICAL: User is speaking PUNJABI. Respond ONLY in proper Punjabi Gurmukhi script."
        );
        assert_eq!(
            LanguageTag::Romanized(Language::Odia).instruction(),
            "CRITICAL: User is speaking ODIA. Respond ONLY in proper Odia script."
        );
    }

    #[test]
    fn test_languages_without_own_instruction_use_generic() {
        for lang in [
            Language::Marathi,
            Language::Gujarati,
            Language::Kannada,
            Language::Malayalam,
        ] {
            assert_eq!(
                LanguageTag::Romanized(lang).instruction(),
                GENERIC_LANGUAGE_INSTRUCTION
            );
            assert_eq!(
                LanguageTag::Native(lang).instruction(),
                GENERIC_LANGUAGE_INSTRUCTION
            );
        }
        assert_eq!(detect("kem cho").instruction(), GENERIC_LANGUAGE_INSTRUCTION);
        assert_eq!(detect("kasa ahat").instruction(), GENERIC_LANGUAGE_INSTRUCTION);
    }

    #[test]
    fn test_own_instruction_languages() {
        for (lang, upper) in [
            (Language::Bengali, "BENGALI"),
            (Language::Tamil, "TAMIL"),
            (Language::Telugu, "TELUGU"),
        ] {
            assert_eq!(
                LanguageTag::Native(lang).instruction(),
                format!(
                    "CRITICAL: User is speaking {upper}. Respond ONLY in proper {} script.",
                    lang.display_name()
                )
            );
        }
    }

    #[test]
    fn test_unknown_uses_generic_instruction() {
        assert_eq!(
            LanguageTag::Unknown.instruction(),
            GENERIC_LANGUAGE_INSTRUCTION
        );
    }

    #[test]
    fn test_language_accessors() {
        assert_eq!(
            LanguageTag::Romanized(Language::Tamil).language(),
            Some(Language::Tamil)
        );
        assert!(LanguageTag::Native(Language::Tamil).is_native());
        assert!(!LanguageTag::Romanized(Language::Tamil).is_native());
        assert_eq!(LanguageTag::Unknown.language(), None);
    }
}
