//! Prompt extraction - recovers the descriptive payload of an image request.

use regex::Regex;

use super::vocabulary::{compile, Vocabulary, VocabularyError};

/// Extractions shorter than this (in characters) are discarded.
pub const MIN_PROMPT_CHARS: usize = 10;

const SCAFFOLDING: &str = r"^(?:please\s+)?(?:(?:can|could)\s+you\s+)?(?:please\s+)?(?:i\s+(?:want|need|would\s+like)\s+(?:you\s+to\s+)?)?";

const DETERMINER: &str = r"(?:an?\s+|some\s+|a\s+few\s+)?";

/// Strips request scaffolding from an image request.
#[derive(Debug, Clone)]
pub struct PromptExtractor {
    /// Removal steps, applied in order to the progressively shrinking prompt.
    steps: Vec<Regex>,
}

impl Default for PromptExtractor {
    fn default() -> Self {
        Self::new(&Vocabulary::default()).expect("built-in vocabulary compiles")
    }
}

impl PromptExtractor {
    pub fn new(vocabulary: &Vocabulary) -> Result<Self, VocabularyError> {
        let steps = vec![
            compile("scaffolding", SCAFFOLDING)?,
            compile("action_words", &vocabulary.action_alternation())?,
            compile(
                "image_nouns",
                &format!(r"{}{}\s*", DETERMINER, vocabulary.noun_alternation()),
            )?,
            compile(
                "descriptors",
                &format!(r"^{}\b\s*", vocabulary.descriptor_alternation()),
            )?,
        ];
        Ok(Self { steps })
    }

    /// Returns the cleaned descriptive prompt. Never blank unless `original` is blank.
    pub fn extract(&self, original: &str) -> String {
        let stripped = self.steps.iter().fold(original.trim().to_string(), |prompt, step| {
            step.replace(&prompt, "").trim().to_string()
        });

        let extracted = if stripped.chars().count() < MIN_PROMPT_CHARS {
            back_half(original)
        } else {
            stripped
        };

        tracing::debug!(prompt = %extracted, "Extracted image prompt");
        extracted
    }
}

/// Back half of the prompt by word count, words split on single spaces.
/// Falls back to the whole trimmed prompt when the back half is blank.
fn back_half(original: &str) -> String {
    let words: Vec<&str> = original.split(' ').collect();
    let half = words[words.len() / 2..].join(" ");
    if half.trim().is_empty() {
        original.trim().to_string()
    } else {
        half
    }
}
