//! Intent vocabulary - the swappable word lists behind classification.
//!
//! A vocabulary maps each lexical category to a set of regex alternatives.
//! The built-in vocabulary is version 1; alternatives can be loaded from YAML
//! so the classifier can be exercised against fixture vocabularies.
//!
//! ```yaml
//! version: 2
//! action_words: ["draw", "paint"]
//! image_nouns: ["image", "picture"]
//! descriptors: ["of", "showing"]
//! request_patterns:
//!   - "{action}\\s+(?:an?\\s+)?{noun}"
//! visual_keywords: ["color", "style"]
//! text_only_indicators:
//!   - "(?:explain|describe)"
//! ```

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Placeholder expanded to the action word alternation.
pub const ACTION_PLACEHOLDER: &str = "{action}";

/// Placeholder expanded to the image noun alternation.
pub const NOUN_PLACEHOLDER: &str = "{noun}";

/// Errors raised while loading or compiling a vocabulary.
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("Failed to read vocabulary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse vocabulary: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Vocabulary category '{0}' is empty")]
    EmptyCategory(&'static str),

    #[error("Invalid pattern in '{category}': {source}")]
    InvalidPattern {
        category: &'static str,
        #[source]
        source: regex::Error,
    },
}

/// Lexical categories used by the intent classifier and prompt extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Version tag of this vocabulary, reported in diagnostics.
    pub version: u32,
    /// Verbs that request creation ("generate", "draw", "show me").
    pub action_words: Vec<String>,
    /// Nouns naming a visual artifact ("image", "poster").
    pub image_nouns: Vec<String>,
    /// Connectors introducing the description ("of", "depicting").
    pub descriptors: Vec<String>,
    /// Composite request rules, evaluated in order.
    pub request_patterns: Vec<String>,
    /// Plain substrings that hint at visual content.
    pub visual_keywords: Vec<String>,
    /// Patterns pointing at a text-only request.
    pub text_only_indicators: Vec<String>,
}

static BUILTIN: Lazy<Vocabulary> = Lazy::new(|| Vocabulary {
    version: 1,
    action_words: strings(&[
        "generate",
        "create",
        "draw",
        "make",
        "produce",
        "design",
        "build",
        "craft",
        "render",
        "paint",
        "sketch",
        "illustrate",
        "visualize",
        r"show\s+me",
        r"give\s+me",
    ]),
    image_nouns: strings(&[
        "image",
        "picture",
        "photo",
        "illustration",
        "drawing",
        "artwork",
        "graphic",
        "visual",
        "design",
        "painting",
        "sketch",
        "diagram",
        "chart",
        "infographic",
        "poster",
        "banner",
        "logo",
        "icon",
        "wallpaper",
        "background",
    ]),
    descriptors: strings(&[
        "of",
        "with",
        "showing",
        "depicting",
        "featuring",
        "containing",
        "representing",
        "about",
    ]),
    request_patterns: strings(&[
        r"{action}\s+(?:an?\s+|some\s+|a\s+few\s+)?{noun}",
        r"(?:i\s+(?:want|need|would\s+like)|can\s+you|could\s+you|please)\s+.*?(?:image|picture|photo|illustration|drawing|artwork|visual)",
        r"(?:what\s+(?:would|does)|how\s+(?:would|does)|visualize|envision).*?(?:look\s+like|appear|seem)",
        r"(?:design|paint|sketch|draw|illustrate|render)(?:\s+(?:me|us))?\s+(?:a|an|some)",
        r"show\s+me\s+(?:what|how|a|an).*?(?:looks?\s+like|appears?|seems?)",
    ]),
    visual_keywords: strings(&[
        "color",
        "style",
        "appearance",
        "visual",
        "artistic",
        "aesthetic",
        "portrait",
        "landscape",
        "scene",
        "character",
        "object",
        "abstract",
        "realistic",
        "cartoon",
        "anime",
        "3d",
        "2d",
        "digital art",
    ]),
    text_only_indicators: strings(&[
        r"(?:explain|describe|tell\s+me|what\s+is|how\s+to|write|list)",
        r"(?:definition|meaning|concept|idea|theory)",
        r"(?:code|program|script|function|algorithm)",
    ]),
});

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl Vocabulary {
    /// Parses a vocabulary from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, VocabularyError> {
        let vocabulary: Vocabulary = serde_yaml::from_str(yaml)?;
        vocabulary.check_categories()?;
        Ok(vocabulary)
    }

    /// Loads a vocabulary from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    fn check_categories(&self) -> Result<(), VocabularyError> {
        if self.action_words.is_empty() {
            return Err(VocabularyError::EmptyCategory("action_words"));
        }
        if self.image_nouns.is_empty() {
            return Err(VocabularyError::EmptyCategory("image_nouns"));
        }
        if self.descriptors.is_empty() {
            return Err(VocabularyError::EmptyCategory("descriptors"));
        }
        Ok(())
    }

    /// Action words joined as a single non-capturing alternation.
    pub fn action_alternation(&self) -> String {
        alternation(&self.action_words)
    }

    /// Image nouns joined as a single non-capturing alternation.
    pub fn noun_alternation(&self) -> String {
        alternation(&self.image_nouns)
    }

    /// Descriptors joined as a single non-capturing alternation.
    pub fn descriptor_alternation(&self) -> String {
        alternation(&self.descriptors)
    }

    /// Expands `{action}` and `{noun}` inside a request pattern template.
    pub fn expand(&self, template: &str) -> String {
        template
            .replace(ACTION_PLACEHOLDER, &self.action_alternation())
            .replace(NOUN_PLACEHOLDER, &self.noun_alternation())
    }
}

fn alternation(items: &[String]) -> String {
    format!("(?:{})", items.join("|"))
}

/// Compiles a case-insensitive pattern, tagging failures with the category.
pub(crate) fn compile(category: &'static str, pattern: &str) -> Result<Regex, VocabularyError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| VocabularyError::InvalidPattern { category, source })
}
