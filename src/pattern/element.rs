//! Token-level constraints of a pattern rule.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{AlaudaError, Result};

/// Secondary condition on a [`TokenElement`] that cancels an otherwise
/// positive match.
///
/// An exception fires when the candidate token satisfies its text and/or
/// POS condition; a fired exception vetoes the element match. With
/// `negated` set, the exception fires when the condition is *not*
/// satisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionClause {
    /// Token text the exception tests: a literal, or a regex source when
    /// `is_regex` is set. `None` when the exception is POS-only.
    #[serde(default)]
    pub text: Option<String>,
    /// POS tag the exception tests, if any.
    #[serde(default)]
    pub pos_tag: Option<String>,
    /// Interpret `text` as a regular expression.
    #[serde(default)]
    pub is_regex: bool,
    /// Invert the condition.
    #[serde(default)]
    pub negated: bool,
    /// Match `text` case-sensitively.
    #[serde(default)]
    pub case_sensitive: bool,
}

impl ExceptionClause {
    /// Exception on token text.
    pub fn text<S: Into<String>>(text: S, is_regex: bool) -> Self {
        ExceptionClause {
            text: Some(text.into()),
            is_regex,
            ..ExceptionClause::default()
        }
    }

    /// Exception on a POS tag.
    pub fn pos<S: Into<String>>(pos_tag: S) -> Self {
        ExceptionClause {
            pos_tag: Some(pos_tag.into()),
            ..ExceptionClause::default()
        }
    }

    /// Invert the condition.
    pub fn negated(mut self) -> Self {
        self.negated = true;
        self
    }

    /// Require a case-sensitive text match.
    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    /// Compile the text condition, anchored to the whole token.
    ///
    /// Returns `None` when the exception has no text condition.
    pub fn text_pattern(&self) -> Result<Option<Regex>> {
        match &self.text {
            Some(text) => {
                compile_token_pattern(text, self.is_regex, self.case_sensitive).map(Some)
            }
            None => Ok(None),
        }
    }
}

/// One position in a rule pattern.
///
/// An element with `negated` set, or with an active exception, is not
/// representable as a plain positive index term; the query builder
/// accounts for that when it translates a rule into an index query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenElement {
    /// Literal token text, or a regex source when `is_regex` is set.
    /// May be empty for elements constrained by other means (e.g. POS-only
    /// elements produced by some rule loaders).
    pub text: String,
    /// Match `text` case-sensitively.
    #[serde(default)]
    pub case_sensitive: bool,
    /// Interpret `text` as a regular expression.
    #[serde(default)]
    pub is_regex: bool,
    /// Invert the match: the element accepts tokens its text does *not*
    /// match.
    #[serde(default)]
    pub negated: bool,
    /// Exception clause cancelling an otherwise positive match.
    #[serde(default)]
    pub exception: Option<ExceptionClause>,
}

impl TokenElement {
    /// Element matching a token text exactly (case-insensitively).
    pub fn literal<S: Into<String>>(text: S) -> Self {
        TokenElement {
            text: text.into(),
            case_sensitive: false,
            is_regex: false,
            negated: false,
            exception: None,
        }
    }

    /// Element matching tokens against a regular expression.
    pub fn regex<S: Into<String>>(source: S) -> Self {
        TokenElement {
            is_regex: true,
            ..TokenElement::literal(source)
        }
    }

    /// Require a case-sensitive match.
    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    /// Invert the match.
    pub fn negated(mut self) -> Self {
        self.negated = true;
        self
    }

    /// Attach an exception clause.
    pub fn with_exception(mut self, exception: ExceptionClause) -> Self {
        self.exception = Some(exception);
        self
    }

    /// Compile this element's token condition, anchored to the whole token.
    ///
    /// Negation and exceptions are not applied here; callers implementing
    /// full matching semantics layer those on top.
    pub fn pattern(&self) -> Result<Regex> {
        compile_token_pattern(&self.text, self.is_regex, self.case_sensitive)
    }
}

fn compile_token_pattern(text: &str, is_regex: bool, case_sensitive: bool) -> Result<Regex> {
    let source = if is_regex {
        text.to_string()
    } else {
        regex::escape(text)
    };
    RegexBuilder::new(&format!("^(?:{source})$"))
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|e| AlaudaError::pattern(format!("token pattern `{text}`: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern_is_case_insensitive() {
        let element = TokenElement::literal("back");
        let pattern = element.pattern().unwrap();
        assert!(pattern.is_match("back"));
        assert!(pattern.is_match("Back"));
        assert!(!pattern.is_match("backs"));
    }

    #[test]
    fn test_case_sensitive_literal() {
        let element = TokenElement::literal("Bleed").case_sensitive();
        let pattern = element.pattern().unwrap();
        assert!(pattern.is_match("Bleed"));
        assert!(!pattern.is_match("bleed"));
    }

    #[test]
    fn test_regex_alternation() {
        let element = TokenElement::regex("forth|back");
        let pattern = element.pattern().unwrap();
        assert!(pattern.is_match("forth"));
        assert!(pattern.is_match("back"));
        assert!(!pattern.is_match("forthback"));
    }

    #[test]
    fn test_literal_with_metacharacters() {
        let element = TokenElement::literal("e.g");
        let pattern = element.pattern().unwrap();
        assert!(pattern.is_match("e.g"));
        assert!(!pattern.is_match("egg"));
    }

    #[test]
    fn test_malformed_regex_is_surfaced() {
        let element = TokenElement::regex("forth|(");
        let err = element.pattern().unwrap_err();
        assert!(matches!(err, AlaudaError::Pattern(_)));
    }

    #[test]
    fn test_exception_text_pattern() {
        let exception = ExceptionClause::text("exception", false);
        let pattern = exception.text_pattern().unwrap().unwrap();
        assert!(pattern.is_match("exception"));
        assert!(!pattern.is_match("other"));

        let pos_only = ExceptionClause::pos("NN");
        assert!(pos_only.text_pattern().unwrap().is_none());
    }
}
