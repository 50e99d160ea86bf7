//! Candidate verification against the true matching predicate.

use log::warn;

use crate::corpus::TokenizedSentence;
use crate::error::{AlaudaError, Result};
use crate::index::{DocId, SentenceIndex};
use crate::pattern::PatternRule;
use crate::search::deadline::Deadline;
use crate::search::result::{MatchRecord, MatchingSentence};

/// The full pattern-matching predicate, supplied by the caller.
///
/// The engine treats it as ground truth: a candidate is reported if and
/// only if the predicate produces at least one match record for it. Calls
/// are assumed synchronous and side-effect-free.
pub trait MatchPredicate {
    /// All matches of `rule` in `sentence`, empty when the sentence does
    /// not trigger the rule.
    fn matches(
        &self,
        rule: &PatternRule,
        sentence: &TokenizedSentence,
    ) -> Result<Vec<MatchRecord>>;
}

impl<F> MatchPredicate for F
where
    F: Fn(&PatternRule, &TokenizedSentence) -> Result<Vec<MatchRecord>>,
{
    fn matches(
        &self,
        rule: &PatternRule,
        sentence: &TokenizedSentence,
    ) -> Result<Vec<MatchRecord>> {
        self(rule, sentence)
    }
}

/// Verified sentences plus verification metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// Sentences the predicate accepted, in candidate order.
    pub matching_sentences: Vec<MatchingSentence>,
    /// Whether verification stopped early because the deadline passed.
    pub time_limited: bool,
}

/// Re-run the true matching predicate over each candidate.
///
/// Result order follows candidate order; sentences with zero match records
/// are dropped. A predicate error on a single candidate is logged and that
/// candidate skipped; if every attempted candidate fails the failure is
/// systemic and propagates as [`AlaudaError::Verification`]. The deadline
/// is polled before each candidate.
pub fn verify<P: MatchPredicate + ?Sized>(
    rule: &PatternRule,
    candidates: &[DocId],
    index: &SentenceIndex,
    predicate: &P,
    deadline: &Deadline,
) -> Result<Verification> {
    let mut matching_sentences = Vec::new();
    let mut time_limited = false;
    let mut attempted = 0usize;
    let mut failed = 0usize;
    let mut last_error: Option<AlaudaError> = None;

    for &doc_id in candidates {
        if deadline.expired() {
            time_limited = true;
            break;
        }
        let document = index.document(doc_id).ok_or_else(|| {
            AlaudaError::index(format!("candidate {doc_id} is not in the searched index"))
        })?;
        attempted += 1;
        match predicate.matches(rule, &document.sentence) {
            Ok(records) if records.is_empty() => {}
            Ok(records) => matching_sentences.push(MatchingSentence {
                doc_id,
                text: document.sentence.text.clone(),
                matches: records,
            }),
            Err(error) => {
                warn!(
                    "skipping candidate {doc_id} for rule {}: {error}",
                    rule.full_id()
                );
                failed += 1;
                last_error = Some(error);
            }
        }
    }

    if attempted > 0 && failed == attempted {
        let last_error = last_error.expect("at least one failure was recorded");
        return Err(AlaudaError::verification(format!(
            "predicate failed for all {attempted} candidates of rule {}, last error: {last_error}",
            rule.full_id()
        )));
    }

    Ok(Verification {
        matching_sentences,
        time_limited,
    })
}
