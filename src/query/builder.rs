//! Translation of pattern rules into coarse index queries.
//!
//! Each element is classified in isolation; the rule's classification
//! sequence then decides between the strict phrase form and a relaxed
//! fallback. The relaxed candidate set must be a superset of the true
//! match set: regex, negated, and exception-bearing elements can only ever
//! widen it, never narrow it.

use log::debug;

use crate::pattern::{PatternRule, TokenElement};
use crate::query::Query;

/// Classification of one token element for index purposes.
///
/// Only `Literal` elements are representable as plain positive index
/// terms; every other class forces the relaxed query form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementClass {
    /// Plain literal text, usable as a positive index term.
    Literal,
    /// Regex element, or an element without literal text (e.g. POS-only);
    /// matches an open set of terms.
    Regex,
    /// Negated element; matched by what a token is *not*.
    Negated,
    /// Element with an active exception clause.
    WithException,
}

/// Classify one element. Pure and total over all element shapes.
pub fn classify(element: &TokenElement) -> ElementClass {
    if element.negated {
        ElementClass::Negated
    } else if element.exception.is_some() {
        ElementClass::WithException
    } else if element.is_regex || element.text.is_empty() {
        ElementClass::Regex
    } else {
        ElementClass::Literal
    }
}

/// A query plus the mode that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    /// The coarse query to run against the index.
    pub query: Query,
    /// Whether relaxation was needed, i.e. the rule was not fully
    /// expressible as an index phrase.
    pub relaxed: bool,
}

/// Build the index query for a rule.
///
/// If every element classifies as [`ElementClass::Literal`], the result is
/// a strict phrase of the lowercased element texts in pattern order.
/// Otherwise only the literal elements contribute terms, as an unordered
/// conjunction; with no literal element at all the query matches every
/// document, accepting that the whole corpus becomes the candidate set.
pub fn build_query(rule: &PatternRule) -> BuiltQuery {
    let all_literal = rule
        .elements
        .iter()
        .all(|element| classify(element) == ElementClass::Literal);

    let terms: Vec<String> = rule
        .elements
        .iter()
        .filter(|element| classify(element) == ElementClass::Literal)
        .map(|element| element.text.to_lowercase())
        .collect();

    if all_literal && !terms.is_empty() {
        return BuiltQuery {
            query: Query::Phrase(terms),
            relaxed: false,
        };
    }

    let query = if terms.is_empty() {
        Query::MatchAll
    } else {
        Query::Conjunction(terms)
    };
    debug!(
        "rule {} not expressible as a phrase, relaxed to {query}",
        rule.full_id()
    );
    BuiltQuery {
        query,
        relaxed: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::ExceptionClause;

    fn rule(elements: Vec<TokenElement>) -> PatternRule {
        PatternRule::new("RULE1", "en", elements, "desc", "msg", "short msg")
    }

    #[test]
    fn test_classify_variants() {
        assert_eq!(classify(&TokenElement::literal("back")), ElementClass::Literal);
        assert_eq!(classify(&TokenElement::regex("forth|back")), ElementClass::Regex);
        assert_eq!(
            classify(&TokenElement::literal("back").negated()),
            ElementClass::Negated
        );
        assert_eq!(
            classify(
                &TokenElement::regex("forth|back")
                    .with_exception(ExceptionClause::text("exception", false))
            ),
            ElementClass::WithException
        );
        // Negation dominates an exception clause.
        assert_eq!(
            classify(
                &TokenElement::literal("x")
                    .negated()
                    .with_exception(ExceptionClause::pos("NN"))
            ),
            ElementClass::Negated
        );
        // No literal text to anchor a term on.
        assert_eq!(classify(&TokenElement::literal("")), ElementClass::Regex);
    }

    #[test]
    fn test_all_literal_elements_build_a_phrase() {
        let built = build_query(&rule(vec![
            TokenElement::literal("Back"),
            TokenElement::literal("and"),
            TokenElement::literal("fourth"),
        ]));
        assert!(!built.relaxed);
        assert_eq!(
            built.query,
            Query::Phrase(vec!["back".into(), "and".into(), "fourth".into()])
        );
    }

    #[test]
    fn test_any_regex_element_relaxes() {
        let built = build_query(&rule(vec![
            TokenElement::literal("move"),
            TokenElement::regex("forth|back"),
        ]));
        assert!(built.relaxed);
        assert_eq!(built.query, Query::Conjunction(vec!["move".into()]));
    }

    #[test]
    fn test_negated_element_relaxes_and_contributes_no_term() {
        let built = build_query(&rule(vec![
            TokenElement::literal("Negated").negated(),
            TokenElement::literal("How"),
        ]));
        assert!(built.relaxed);
        assert_eq!(built.query, Query::Conjunction(vec!["how".into()]));
    }

    #[test]
    fn test_exception_element_relaxes() {
        let built = build_query(&rule(vec![
            TokenElement::literal("move"),
            TokenElement::regex("forth|back").with_exception(ExceptionClause::pos("POS")),
        ]));
        assert!(built.relaxed);
        assert_eq!(built.query, Query::Conjunction(vec!["move".into()]));
    }

    #[test]
    fn test_no_plain_element_matches_all() {
        let built = build_query(&rule(vec![
            TokenElement::regex("forth|back").with_exception(ExceptionClause::pos("POS")),
        ]));
        assert!(built.relaxed);
        assert_eq!(built.query, Query::MatchAll);
    }

    #[test]
    fn test_empty_rule_matches_all() {
        let built = build_query(&rule(Vec::new()));
        assert!(built.relaxed);
        assert_eq!(built.query, Query::MatchAll);
    }

    #[test]
    fn test_single_literal_is_a_one_term_phrase() {
        let built = build_query(&rule(vec![TokenElement::literal("lid")]));
        assert!(!built.relaxed);
        assert_eq!(built.query, Query::Phrase(vec!["lid".into()]));
    }
}
