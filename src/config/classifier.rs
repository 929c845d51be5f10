//! Intent classifier configuration

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::intent::{
    IntentClassifier, PromptExtractor, Vocabulary, VocabularyError, DEFAULT_IMAGE_THRESHOLD,
};

/// Intent classifier configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Score at or above which a prompt is an image request
    #[serde(default = "default_threshold")]
    pub threshold: i32,

    /// Optional YAML vocabulary replacing the built-in one
    pub vocabulary_path: Option<PathBuf>,
}

impl ClassifierConfig {
    /// Loads the configured vocabulary, or the built-in one.
    pub fn vocabulary(&self) -> Result<Vocabulary, VocabularyError> {
        match &self.vocabulary_path {
            Some(path) => Vocabulary::from_yaml_file(path),
            None => Ok(Vocabulary::default()),
        }
    }

    /// Builds the classifier and extractor from one vocabulary.
    pub fn build(&self) -> Result<(IntentClassifier, PromptExtractor), VocabularyError> {
        let vocabulary = self.vocabulary()?;
        let classifier = IntentClassifier::new(&vocabulary)?.with_threshold(self.threshold);
        let extractor = PromptExtractor::new(&vocabulary)?;
        Ok((classifier, extractor))
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            vocabulary_path: None,
        }
    }
}

fn default_threshold() -> i32 {
    DEFAULT_IMAGE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_builtin_vocabulary() {
        let config = ClassifierConfig::default();
        assert_eq!(config.threshold, 25);
        assert_eq!(config.vocabulary().unwrap(), Vocabulary::default());
    }

    #[test]
    fn test_build_applies_threshold() {
        let config = ClassifierConfig {
            threshold: 70,
            ..Default::default()
        };
        let (classifier, _) = config.build().unwrap();
        assert_eq!(classifier.threshold(), 70);
    }

    #[test]
    fn test_missing_vocabulary_file_is_an_error() {
        let config = ClassifierConfig {
            vocabulary_path: Some(PathBuf::from("/nonexistent/vocabulary.yaml")),
            ..Default::default()
        };
        assert!(matches!(config.vocabulary(), Err(VocabularyError::Io(_))));
    }
}
