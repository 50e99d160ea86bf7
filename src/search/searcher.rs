//! End-to-end rule search pipeline.

use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::index::SentenceIndex;
use crate::pattern::{PatternRule, RuleSource, find_rule_by_id};
use crate::query::build_query;
use crate::search::deadline::Deadline;
use crate::search::result::SearchResult;
use crate::search::retriever::retrieve;
use crate::search::verifier::{MatchPredicate, verify};

/// Tunables for a search session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Wall-clock budget for one search, spanning retrieval and
    /// verification. `None` means unbounded.
    pub deadline: Option<Duration>,
    /// How many documents the retriever sweeps between deadline polls.
    pub check_interval: usize,
    /// Upper bound on candidates carried into verification; the lowest
    /// document ids are kept. Exceeding it does not set `time_limited`.
    pub max_candidates: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            deadline: Some(Duration::from_secs(5)),
            check_interval: 32,
            max_candidates: None,
        }
    }
}

/// Finds the sentences of an indexed corpus that a pattern rule flags,
/// without running the full matcher against every sentence.
///
/// Each search builds a coarse index query from the rule (relaxing it when
/// the rule is not fully expressible), retrieves candidates under the
/// configured deadline, and re-verifies every candidate with the
/// caller-supplied predicate. Searches share no mutable state: one
/// `Searcher` can serve concurrent searches against the same frozen index.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    config: SearchConfig,
}

impl Searcher {
    /// A searcher with the default configuration.
    pub fn new() -> Self {
        Searcher::default()
    }

    /// A searcher with an explicit configuration.
    pub fn with_config(config: SearchConfig) -> Self {
        Searcher { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Find all sentences in `index` that `rule` flags.
    ///
    /// One deadline from the configuration covers both retrieval and
    /// verification; `time_limited` on the result reports whether the full
    /// pipeline completed within the budget.
    pub fn search<P: MatchPredicate + ?Sized>(
        &self,
        rule: &PatternRule,
        index: &SentenceIndex,
        predicate: &P,
    ) -> Result<SearchResult> {
        let deadline = match self.config.deadline {
            Some(budget) => Deadline::after(budget),
            None => Deadline::none(),
        };
        self.search_with_deadline(rule, index, predicate, &deadline)
    }

    /// Like [`search`](Searcher::search), with a caller-supplied deadline.
    pub fn search_with_deadline<P: MatchPredicate + ?Sized>(
        &self,
        rule: &PatternRule,
        index: &SentenceIndex,
        predicate: &P,
        deadline: &Deadline,
    ) -> Result<SearchResult> {
        let built = build_query(rule);
        debug!(
            "searching rule {} with query {} (relaxed: {})",
            rule.full_id(),
            built.query,
            built.relaxed
        );

        let mut retrieval = retrieve(index, &built.query, deadline, self.config.check_interval);
        if let Some(max_candidates) = self.config.max_candidates
            && retrieval.candidates.len() > max_candidates
        {
            debug!(
                "rule {}: capping {} candidates to {max_candidates}",
                rule.full_id(),
                retrieval.candidates.len()
            );
            retrieval.candidates.truncate(max_candidates);
        }

        let verification = verify(rule, &retrieval.candidates, index, predicate, deadline)?;

        Ok(SearchResult::assemble(
            retrieval.scanned,
            verification.matching_sentences,
            built.relaxed,
            retrieval.time_limited || verification.time_limited,
            built.query.to_string(),
        ))
    }

    /// Look up a rule by composite id in `source`, then search for it.
    ///
    /// Fails with [`AlaudaError::RuleNotFound`](crate::AlaudaError::RuleNotFound)
    /// when the id is absent from the source.
    pub fn search_rule_id<S, P>(
        &self,
        id: &str,
        source: &S,
        index: &SentenceIndex,
        predicate: &P,
    ) -> Result<SearchResult>
    where
        S: RuleSource + ?Sized,
        P: MatchPredicate + ?Sized,
    {
        let rule = find_rule_by_id(id, source)?;
        self.search(&rule, index, predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{CorpusDocument, TokenizedSentence, reference_tokenize};
    use crate::pattern::TokenElement;
    use crate::search::result::MatchRecord;

    fn index() -> SentenceIndex {
        SentenceIndex::build(vec![
            CorpusDocument::text(
                0,
                reference_tokenize("How to move back and fourth from linux to xmb?"),
            ),
            CorpusDocument::text(47, reference_tokenize("Calcium deposits on eye lid.")),
        ])
        .unwrap()
    }

    /// Predicate accepting sentences whose token sequence contains the
    /// rule's literal element texts as a contiguous run.
    fn literal_run(rule: &PatternRule, sentence: &TokenizedSentence) -> crate::error::Result<Vec<MatchRecord>> {
        let wanted: Vec<String> = rule
            .elements
            .iter()
            .map(|element| element.text.to_lowercase())
            .collect();
        let tokens = &sentence.tokens;
        let mut records = Vec::new();
        if wanted.is_empty() || tokens.len() < wanted.len() {
            return Ok(records);
        }
        for start in 0..=tokens.len() - wanted.len() {
            let run_matches = wanted
                .iter()
                .enumerate()
                .all(|(offset, text)| tokens[start + offset].text.to_lowercase() == *text);
            if run_matches {
                records.push(MatchRecord::new(
                    rule,
                    tokens[start].start,
                    tokens[start + wanted.len() - 1].end,
                ));
            }
        }
        Ok(records)
    }

    #[test]
    fn test_end_to_end_strict_search() {
        let rule = PatternRule::new(
            "BACK_AND_FOURTH",
            "en",
            vec![
                TokenElement::literal("back"),
                TokenElement::literal("and"),
                TokenElement::literal("fourth"),
            ],
            "desc",
            "msg",
            "short msg",
        );
        let index = index();
        let searcher = Searcher::new();
        let result = searcher.search(&rule, &index, &literal_run).unwrap();

        assert_eq!(result.checked_sentences, 2);
        assert_eq!(result.matching_sentences.len(), 1);
        assert!(!result.relaxed_query);
        assert!(!result.time_limited);
        assert_eq!(result.query_text, "\"back and fourth\"");
    }

    #[test]
    fn test_max_candidates_caps_verification() {
        let docs = (0..10)
            .map(|n| CorpusDocument::text(n * 10, reference_tokenize("move it move it")))
            .collect();
        let index = SentenceIndex::build(docs).unwrap();
        let rule = PatternRule::new(
            "MOVE",
            "en",
            vec![TokenElement::literal("move")],
            "",
            "",
            "",
        );
        let searcher = Searcher::with_config(SearchConfig {
            max_candidates: Some(3),
            ..SearchConfig::default()
        });
        let result = searcher.search(&rule, &index, &literal_run).unwrap();
        assert_eq!(result.matching_sentences.len(), 3);
        assert_eq!(result.checked_sentences, 10);
        assert!(!result.time_limited);
    }

    #[test]
    fn test_search_rule_id_not_found() {
        use crate::pattern::RuleSet;

        let index = index();
        let searcher = Searcher::new();
        let err = searcher
            .search_rule_id("Invalid Rule Id", &RuleSet::default(), &index, &literal_run)
            .unwrap_err();
        assert!(matches!(err, crate::error::AlaudaError::RuleNotFound(_)));
    }
}
