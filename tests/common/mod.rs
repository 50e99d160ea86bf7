//! Test stand-ins for the external collaborators.
//!
//! Production deployments supply the full linguistic matcher; the tests
//! use [`ReferenceMatcher`], a small interpreter of the pattern model over
//! tokenized sentences, so the filter-then-verify pipeline can be
//! exercised end to end.

use alauda::{
    AlaudaError, ExceptionClause, MatchPredicate, MatchRecord, PatternRule, Result, Token,
    TokenizedSentence,
};

/// Interprets a rule's element sequence against consecutive tokens.
///
/// Element semantics: the element pattern (literal or regex, honoring the
/// case flag) must accept the token text; negation inverts that; an
/// exception clause cancels an otherwise positive match when its text or
/// POS condition holds for the token.
pub struct ReferenceMatcher;

impl MatchPredicate for ReferenceMatcher {
    fn matches(
        &self,
        rule: &PatternRule,
        sentence: &TokenizedSentence,
    ) -> Result<Vec<MatchRecord>> {
        let tokens = &sentence.tokens;
        let len = rule.elements.len();
        let mut records = Vec::new();
        if len == 0 || tokens.len() < len {
            return Ok(records);
        }
        for start in 0..=tokens.len() - len {
            let mut all_match = true;
            for (offset, element) in rule.elements.iter().enumerate() {
                if !element_matches(element, &tokens[start + offset])? {
                    all_match = false;
                    break;
                }
            }
            if all_match {
                records.push(MatchRecord::new(
                    rule,
                    tokens[start].start,
                    tokens[start + len - 1].end,
                ));
            }
        }
        Ok(records)
    }
}

fn element_matches(element: &alauda::TokenElement, token: &Token) -> Result<bool> {
    let mut hit = element.pattern()?.is_match(&token.text);
    if element.negated {
        return Ok(!hit);
    }
    if hit
        && let Some(exception) = &element.exception
        && exception_holds(exception, token)?
    {
        hit = false;
    }
    Ok(hit)
}

fn exception_holds(exception: &ExceptionClause, token: &Token) -> Result<bool> {
    let mut holds = false;
    if let Some(pattern) = exception.text_pattern()? {
        holds |= pattern.is_match(&token.text);
    }
    if let Some(pos_tag) = &exception.pos_tag {
        holds |= token.pos_tags.iter().any(|tag| tag == pos_tag);
    }
    if exception.negated {
        holds = !holds;
    }
    Ok(holds)
}

/// A predicate that fails for every sentence, for systemic-failure tests.
#[allow(dead_code)]
pub fn broken_predicate(
    _rule: &PatternRule,
    _sentence: &TokenizedSentence,
) -> Result<Vec<MatchRecord>> {
    Err(AlaudaError::invalid_argument("analysis unavailable"))
}
