//! Pattern rules: ordered token constraints plus presentation metadata.

use serde::{Deserialize, Serialize};

use crate::pattern::element::TokenElement;

/// A rule describing a text violation as an ordered sequence of
/// token-matching elements.
///
/// Rules are created by the external rule-definition loader (or built
/// programmatically) and are immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRule {
    /// Rule identifier, unique within a rule set up to `sub_id`.
    pub id: String,
    /// Sub-identifier distinguishing variants of the same rule.
    #[serde(default)]
    pub sub_id: Option<String>,
    /// Language the rule belongs to (e.g. `"en"`).
    pub language: String,
    /// The token constraints, one per pattern position.
    pub elements: Vec<TokenElement>,
    /// Human-readable description of what the rule detects.
    #[serde(default)]
    pub description: String,
    /// Message template attached to each match.
    #[serde(default)]
    pub message: String,
    /// Short message variant.
    #[serde(default)]
    pub short_message: String,
    /// Curated sentences known to trigger the rule; used to build
    /// rule-example corpora.
    #[serde(default)]
    pub incorrect_examples: Vec<String>,
}

impl PatternRule {
    /// Create a rule from its identifier, language, and elements.
    pub fn new<S: Into<String>>(
        id: S,
        language: S,
        elements: Vec<TokenElement>,
        description: S,
        message: S,
        short_message: S,
    ) -> Self {
        PatternRule {
            id: id.into(),
            sub_id: None,
            language: language.into(),
            elements,
            description: description.into(),
            message: message.into(),
            short_message: short_message.into(),
            incorrect_examples: Vec::new(),
        }
    }

    /// Set the sub-identifier.
    pub fn with_sub_id<S: Into<String>>(mut self, sub_id: S) -> Self {
        self.sub_id = Some(sub_id.into());
        self
    }

    /// Attach curated incorrect examples.
    pub fn with_incorrect_examples(mut self, examples: Vec<String>) -> Self {
        self.incorrect_examples = examples;
        self
    }

    /// The composite identifier: `ID` without a sub-id, `ID[sub]` with one.
    pub fn full_id(&self) -> String {
        match &self.sub_id {
            Some(sub_id) => format!("{}[{}]", self.id, sub_id),
            None => self.id.clone(),
        }
    }

    /// Whether `id` names this rule, either by bare id or by composite
    /// `ID[sub]` form.
    pub fn matches_id(&self, id: &str) -> bool {
        id == self.id || id == self.full_id()
    }
}
