//! Intent module - pure text analysis that precedes any backend call.
//!
//! - `IntentClassifier` - text vs image decision with a reasoning trail
//! - `PromptExtractor` - descriptive payload for image synthesis
//! - `Vocabulary` - the swappable word lists both are compiled from

mod classifier;
mod extractor;
mod vocabulary;

pub use classifier::{
    ClassificationResult, Contribution, IntentClassifier, Rule, RuleInput, ACTION_AND_NOUN_WEIGHT,
    ACTION_ONLY_WEIGHT, DEFAULT_IMAGE_THRESHOLD, NEGATIVE_EVIDENCE_CEILING, NOUN_ONLY_WEIGHT,
    PATTERN_WEIGHT, TEXT_ONLY_WEIGHT, VISUAL_KEYWORD_WEIGHT,
};
pub use extractor::{PromptExtractor, MIN_PROMPT_CHARS};
pub use vocabulary::{Vocabulary, VocabularyError, ACTION_PLACEHOLDER, NOUN_PLACEHOLDER};
