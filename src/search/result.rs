//! Search results reported back to callers.

use serde::{Deserialize, Serialize};

use crate::index::DocId;
use crate::pattern::PatternRule;

/// One concrete violation found by the verification predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Id of the rule that produced the match.
    pub rule_id: String,
    /// Sub-id of the rule, if it has one.
    #[serde(default)]
    pub sub_id: Option<String>,
    /// Byte offset of the match start within the sentence text.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
    /// The rule's message, rendered for this match.
    pub message: String,
}

impl MatchRecord {
    /// A record for `rule` covering `start..end` of the sentence.
    pub fn new(rule: &PatternRule, start: usize, end: usize) -> Self {
        MatchRecord {
            rule_id: rule.id.clone(),
            sub_id: rule.sub_id.clone(),
            start,
            end,
            message: rule.message.clone(),
        }
    }

    /// The composite id of the producing rule.
    pub fn full_rule_id(&self) -> String {
        match &self.sub_id {
            Some(sub_id) => format!("{}[{}]", self.rule_id, sub_id),
            None => self.rule_id.clone(),
        }
    }
}

/// A sentence accepted by the verifier, with every match it produced.
///
/// A sentence can carry more than one record for the same rule, e.g. for
/// adjacent or repeated violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingSentence {
    /// Id of the sentence's document in the searched index.
    pub doc_id: DocId,
    /// The sentence text.
    pub text: String,
    /// The match records, in match-position order.
    pub matches: Vec<MatchRecord>,
}

/// Outcome of one rule search over a frozen index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// How many sentences the retriever scanned. Equals the corpus size
    /// unless the search was time-limited.
    pub checked_sentences: usize,
    /// The verified matching sentences, in candidate order.
    pub matching_sentences: Vec<MatchingSentence>,
    /// Whether the rule was not fully expressible as an index phrase and a
    /// relaxed query ran instead.
    pub relaxed_query: bool,
    /// Whether the scan or verification was cut short by the deadline.
    pub time_limited: bool,
    /// Human-readable rendering of the (possibly relaxed) query, for
    /// diagnostics.
    pub query_text: String,
}

impl SearchResult {
    /// Assemble the public result from the phase outputs. Pure assembly,
    /// no logic beyond it.
    pub fn assemble(
        checked_sentences: usize,
        matching_sentences: Vec<MatchingSentence>,
        relaxed_query: bool,
        time_limited: bool,
        query_text: String,
    ) -> Self {
        SearchResult {
            checked_sentences,
            matching_sentences,
            relaxed_query,
            time_limited,
            query_text,
        }
    }

    /// Total number of match records across all matching sentences.
    pub fn match_count(&self) -> usize {
        self.matching_sentences
            .iter()
            .map(|sentence| sentence.matches.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::TokenElement;

    #[test]
    fn test_match_record_full_rule_id() {
        let rule = PatternRule::new(
            "BACK_AND_FOURTH",
            "en",
            vec![TokenElement::literal("back")],
            "",
            "Did you mean forth?",
            "",
        )
        .with_sub_id("1");
        let record = MatchRecord::new(&rule, 12, 26);
        assert_eq!(record.full_rule_id(), "BACK_AND_FOURTH[1]");
        assert_eq!(record.message, "Did you mean forth?");
        assert_eq!((record.start, record.end), (12, 26));
    }

    #[test]
    fn test_match_count_sums_records() {
        let rule = PatternRule::new("R", "en", vec![], "", "", "");
        let result = SearchResult::assemble(
            2,
            vec![MatchingSentence {
                doc_id: 0,
                text: "so so".to_string(),
                matches: vec![MatchRecord::new(&rule, 0, 2), MatchRecord::new(&rule, 3, 5)],
            }],
            false,
            false,
            "\"so\"".to_string(),
        );
        assert_eq!(result.match_count(), 2);
    }
}
