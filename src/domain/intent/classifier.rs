//! Intent classifier - decides between a text reply and image synthesis.
//!
//! Classification is weighted rule scoring. Rules are kept as an ordered list
//! and folded over a running score, so each term of the decision can be
//! tested on its own. The final verdict compares the score against a single
//! threshold.

use regex::Regex;
use serde::Serialize;

use super::vocabulary::{compile, Vocabulary, VocabularyError};

/// Score at or above which a prompt is treated as an image request.
pub const DEFAULT_IMAGE_THRESHOLD: i32 = 25;

/// Weight added by each matching composite request pattern.
pub const PATTERN_WEIGHT: i32 = 30;

/// Weight when both an action word and an image noun are present.
pub const ACTION_AND_NOUN_WEIGHT: i32 = 25;

/// Weight when only an action word is present.
pub const ACTION_ONLY_WEIGHT: i32 = 10;

/// Weight when only an image noun is present.
pub const NOUN_ONLY_WEIGHT: i32 = 15;

/// Weight added per visual context keyword.
pub const VISUAL_KEYWORD_WEIGHT: i32 = 5;

/// Weight of each text-only indicator (negative evidence).
pub const TEXT_ONLY_WEIGHT: i32 = -15;

/// Negative evidence only applies while the running score is below this.
pub const NEGATIVE_EVIDENCE_CEILING: i32 = 40;

/// Outcome of classifying one prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub is_image_request: bool,
    /// Unbounded heuristic score, only meaningful relative to the threshold.
    pub confidence: i32,
    /// Score line, decision line, then one note per contributing rule.
    pub reasoning: Vec<String>,
    /// Identifiers of the request patterns that fired.
    pub matched_patterns: Vec<String>,
}

impl ClassificationResult {
    /// Reasoning trail as a single newline-separated block.
    pub fn reasoning_text(&self) -> String {
        self.reasoning.join("\n")
    }
}

/// What a single rule adds to the running score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub weight: i32,
    pub note: String,
    pub pattern_id: Option<String>,
}

/// Prompt views shared by every rule evaluation.
#[derive(Debug)]
pub struct RuleInput<'a> {
    pub prompt: &'a str,
    pub lowered: String,
}

impl<'a> RuleInput<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self {
            prompt,
            lowered: prompt.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone)]
enum RuleKind {
    RequestPattern(Regex),
    ActionNoun { action: Regex, noun: Regex },
    VisualKeywords(Vec<String>),
    TextOnly(Regex),
}

/// One scoring rule.
#[derive(Debug, Clone)]
pub struct Rule {
    id: String,
    kind: RuleKind,
}

impl Rule {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Evaluates the rule against the prompt given the score accumulated so far.
    pub fn evaluate(&self, input: &RuleInput<'_>, running: i32) -> Option<Contribution> {
        match &self.kind {
            RuleKind::RequestPattern(pattern) => pattern.is_match(input.prompt).then(|| {
                let index = self.id.trim_start_matches("Pattern ");
                Contribution {
                    weight: PATTERN_WEIGHT,
                    note: format!("Matched direct image request pattern {}", index),
                    pattern_id: Some(self.id.clone()),
                }
            }),
            RuleKind::ActionNoun { action, noun } => {
                let has_action = action.is_match(input.prompt);
                let has_noun = noun.is_match(input.prompt);
                let (weight, note) = match (has_action, has_noun) {
                    (true, true) => (ACTION_AND_NOUN_WEIGHT, "Contains both action word and image noun"),
                    (true, false) => (ACTION_ONLY_WEIGHT, "Contains action word but no clear image noun"),
                    (false, true) => (NOUN_ONLY_WEIGHT, "Contains image noun but no clear action word"),
                    (false, false) => return None,
                };
                Some(Contribution {
                    weight,
                    note: note.to_string(),
                    pattern_id: None,
                })
            }
            RuleKind::VisualKeywords(keywords) => {
                let found: Vec<&str> = keywords
                    .iter()
                    .filter(|keyword| input.lowered.contains(keyword.as_str()))
                    .map(String::as_str)
                    .collect();
                if found.is_empty() {
                    return None;
                }
                Some(Contribution {
                    weight: VISUAL_KEYWORD_WEIGHT * found.len() as i32,
                    note: format!("Found visual context keywords: {}", found.join(", ")),
                    pattern_id: None,
                })
            }
            RuleKind::TextOnly(pattern) => {
                (running < NEGATIVE_EVIDENCE_CEILING && pattern.is_match(input.prompt)).then(|| {
                    Contribution {
                        weight: TEXT_ONLY_WEIGHT,
                        note: "Contains text-only request indicators".to_string(),
                        pattern_id: None,
                    }
                })
            }
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    confidence: i32,
    notes: Vec<String>,
    matched: Vec<String>,
}

impl Tally {
    fn absorb(mut self, contribution: Option<Contribution>) -> Self {
        if let Some(contribution) = contribution {
            self.confidence += contribution.weight;
            self.notes.push(contribution.note);
            if let Some(id) = contribution.pattern_id {
                self.matched.push(id);
            }
        }
        self
    }
}

/// Heuristic image-intent classifier.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<Rule>,
    threshold: i32,
    vocabulary_version: u32,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(&Vocabulary::default()).expect("built-in vocabulary compiles")
    }
}

impl IntentClassifier {
    /// Compiles the rule list for a vocabulary.
    ///
    /// Rule order is part of the scoring contract: request patterns, then the
    /// action/noun check, then visual keywords, then negative evidence.
    pub fn new(vocabulary: &Vocabulary) -> Result<Self, VocabularyError> {
        let mut rules = Vec::new();

        for (index, template) in vocabulary.request_patterns.iter().enumerate() {
            rules.push(Rule {
                id: format!("Pattern {}", index + 1),
                kind: RuleKind::RequestPattern(compile("request_patterns", &vocabulary.expand(template))?),
            });
        }

        rules.push(Rule {
            id: "action_noun".to_string(),
            kind: RuleKind::ActionNoun {
                action: compile("action_words", &vocabulary.action_alternation())?,
                noun: compile("image_nouns", &vocabulary.noun_alternation())?,
            },
        });

        rules.push(Rule {
            id: "visual_keywords".to_string(),
            kind: RuleKind::VisualKeywords(
                vocabulary.visual_keywords.iter().map(|k| k.to_lowercase()).collect(),
            ),
        });

        for (index, indicator) in vocabulary.text_only_indicators.iter().enumerate() {
            rules.push(Rule {
                id: format!("text_only_{}", index + 1),
                kind: RuleKind::TextOnly(compile("text_only_indicators", indicator)?),
            });
        }

        Ok(Self {
            rules,
            threshold: DEFAULT_IMAGE_THRESHOLD,
            vocabulary_version: vocabulary.version,
        })
    }

    /// Overrides the decision threshold.
    pub fn with_threshold(mut self, threshold: i32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Classifies a prompt. Total over all inputs.
    pub fn classify(&self, prompt: &str) -> ClassificationResult {
        let input = RuleInput::new(prompt);

        let tally = self.rules.iter().fold(Tally::default(), |tally, rule| {
            let contribution = rule.evaluate(&input, tally.confidence);
            tally.absorb(contribution)
        });

        let is_image_request = tally.confidence >= self.threshold;

        let mut reasoning = Vec::with_capacity(tally.notes.len() + 2);
        reasoning.push(format!("Confidence score: {}/100", tally.confidence));
        reasoning.push(format!(
            "Decision: {}",
            if is_image_request { "IMAGE GENERATION" } else { "TEXT RESPONSE" }
        ));
        reasoning.extend(tally.notes);

        tracing::debug!(
            vocabulary_version = self.vocabulary_version,
            confidence = tally.confidence,
            is_image_request,
            "Classified prompt intent"
        );

        ClassificationResult {
            is_image_request,
            confidence: tally.confidence,
            reasoning,
            matched_patterns: tally.matched,
        }
    }
}
