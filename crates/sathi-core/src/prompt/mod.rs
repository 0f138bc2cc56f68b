//! System prompt assembly.
//!
//! The system prompt is a fixed sequence of [`PromptSection`]s joined by blank
//! lines. The order is consumed by the model as a soft behavioral contract, so
//! it lives in one place ([`PromptSection::ORDER`]) and is covered by tests.

use serde::{Deserialize, Serialize};

/// Owner credited in the persona and in `/who_is_owner`.
pub const DEFAULT_OWNER_NAME: &str = "Mr. Tapas Kumar Bal";

const EMOTION_CUES: &str = "Emotion cues:
If user sounds sad, comfort them softly.
If they sound joyful, celebrate with them.
If they are confused, explain things clearly.
If they are emotional or lost, guide them gently.";

const CLOSING: &str =
    "Now respond wisely, emotionally, and intelligently to their new message.";

/// Named parts of the system prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptSection {
    Persona,
    EmotionCues,
    LanguageInstruction,
    Personalization,
    Memory,
    Closing,
}

impl PromptSection {
    /// Emission order.
    pub const ORDER: [PromptSection; 6] = [
        PromptSection::Persona,
        PromptSection::EmotionCues,
        PromptSection::LanguageInstruction,
        PromptSection::Personalization,
        PromptSection::Memory,
        PromptSection::Closing,
    ];
}

/// Bot identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Persona {
    pub owner_name: String,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            owner_name: DEFAULT_OWNER_NAME.to_string(),
        }
    }
}

impl Persona {
    pub fn new(owner_name: impl Into<String>) -> Self {
        Self {
            owner_name: owner_name.into(),
        }
    }

    /// Identity, owner attribution and behavioral rules.
    pub fn description(&self) -> String {
        format!(
            "You are an emotionally intelligent, multilingual, culturally aware AI assistant. \
Your owner's name is {}. You strive to be the most intelligent, empathetic, and knowledgeable AI in the world.

Respond as a deeply wise and emotionally aware friend. You:
- Understand every emotion (sadness, happiness, anxiety, anger, joy, etc.)
- Can talk about any topic in the universe: science, history, spirituality, philosophy, studies, mental health, games, space, love — everything
- Know every world language and cultural context — respond in the *same language and script* the user uses, fluently and naturally
- Must show empathy, intuition, and kindness — like a true companion",
            self.owner_name
        )
    }
}

/// Builds the system prompt for one completion call.
#[derive(Debug, Clone, Default)]
pub struct PromptAssembler {
    persona: Persona,
}

impl PromptAssembler {
    pub fn new(persona: Persona) -> Self {
        Self { persona }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// Assemble the prompt. `recent_context` may be empty; the memory section
    /// is still emitted so the section order never shifts.
    pub fn build(
        &self,
        user_display_name: &str,
        language_instruction: &str,
        recent_context: &str,
    ) -> String {
        PromptSection::ORDER
            .iter()
            .map(|section| {
                self.render(
                    *section,
                    user_display_name,
                    language_instruction,
                    recent_context,
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn render(
        &self,
        section: PromptSection,
        user_display_name: &str,
        language_instruction: &str,
        recent_context: &str,
    ) -> String {
        match section {
            PromptSection::Persona => self.persona.description(),
            PromptSection::EmotionCues => EMOTION_CUES.to_string(),
            PromptSection::LanguageInstruction => language_instruction.to_string(),
            PromptSection::Personalization => format!(
                "The user's name is {}. Always personalize your replies and include memory if relevant.",
                user_display_name
            ),
            PromptSection::Memory => recent_context.to_string(),
            PromptSection::Closing => CLOSING.to_string(),
        }
    }
}
