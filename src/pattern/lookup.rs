//! Rule lookup by composite identifier.

use serde::{Deserialize, Serialize};

use crate::error::{AlaudaError, Result};
use crate::pattern::rule::PatternRule;

/// A source of parsed pattern rules.
///
/// The rule-definition format and its parser live outside this crate; a
/// `RuleSource` hands over the parsed form.
pub trait RuleSource {
    /// All rules this source provides, in definition order.
    fn rules(&self) -> Result<Vec<PatternRule>>;
}

/// An in-memory rule collection, the plain `RuleSource` implementation.
///
/// External loaders that emit JSON can hand their output to
/// [`RuleSet::from_json`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<PatternRule>,
}

impl RuleSet {
    /// Create a rule set from already-parsed rules.
    pub fn new(rules: Vec<PatternRule>) -> Self {
        RuleSet { rules }
    }

    /// Deserialize a rule set from a JSON array of rules.
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: Vec<PatternRule> = serde_json::from_str(json)?;
        Ok(RuleSet { rules })
    }

    /// Number of rules in the set.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over the rules in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &PatternRule> {
        self.rules.iter()
    }
}

impl RuleSource for RuleSet {
    fn rules(&self) -> Result<Vec<PatternRule>> {
        Ok(self.rules.clone())
    }
}

/// Find the first rule whose composite identifier matches `id`.
///
/// `id` may be a bare rule id (matching every sub-rule, first one wins) or
/// the composite `ID[sub]` form. An id absent from the source fails with
/// [`AlaudaError::RuleNotFound`]; lookup never falls back to a default
/// rule.
pub fn find_rule_by_id<S: RuleSource + ?Sized>(id: &str, source: &S) -> Result<PatternRule> {
    source
        .rules()?
        .into_iter()
        .find(|rule| rule.matches_id(id))
        .ok_or_else(|| AlaudaError::rule_not_found(id))
}
