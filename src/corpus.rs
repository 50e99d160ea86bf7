//! Corpus input types produced by external tokenizers and taggers.
//!
//! The engine never tokenizes raw text on its own behalf: sentences arrive
//! already segmented into tokens with stable byte offsets, typically from a
//! language-specific tokenizer/tagger pipeline. The types here are the
//! hand-off format, plus [`reference_tokenize`], a minimal stand-in
//! tokenizer for tests and demos.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// One token of an analyzed sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text of the token.
    pub text: String,
    /// Byte offset of the token start within the sentence text.
    pub start: usize,
    /// Byte offset one past the token end.
    pub end: usize,
    /// POS readings from the external tagger. Empty when untagged.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pos_tags: Vec<String>,
}

impl Token {
    /// Create an untagged token.
    pub fn new<S: Into<String>>(text: S, start: usize, end: usize) -> Self {
        Token {
            text: text.into(),
            start,
            end,
            pos_tags: Vec::new(),
        }
    }

    /// Attach POS readings to this token.
    pub fn with_pos_tags(mut self, pos_tags: Vec<String>) -> Self {
        self.pos_tags = pos_tags;
        self
    }
}

/// A sentence segmented into tokens with stable byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizedSentence {
    /// The original sentence text.
    pub text: String,
    /// The tokens covering the sentence, in reading order.
    pub tokens: Vec<Token>,
}

impl TokenizedSentence {
    /// Create a tokenized sentence from its text and token sequence.
    pub fn new<S: Into<String>>(text: S, tokens: Vec<Token>) -> Self {
        TokenizedSentence {
            text: text.into(),
            tokens,
        }
    }
}

/// Where an indexed sentence came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentSource {
    /// A curated incorrect example owned by a rule, keyed by the rule's
    /// composite id.
    RuleExample {
        /// Composite id (`ID` or `ID[sub]`) of the defining rule.
        rule_id: String,
    },
    /// A sentence taken from free text, identified by its byte offset in
    /// the source document.
    Text {
        /// Byte offset of the sentence within the source text.
        offset: usize,
    },
}

/// One indexable unit: a sentence plus its provenance.
///
/// Created at index-build time and owned by the index afterwards; never
/// mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusDocument {
    /// Provenance of the sentence.
    pub source: DocumentSource,
    /// The analyzed sentence.
    pub sentence: TokenizedSentence,
}

impl CorpusDocument {
    /// Create a document for a rule's curated incorrect example.
    pub fn rule_example<S: Into<String>>(rule_id: S, sentence: TokenizedSentence) -> Self {
        CorpusDocument {
            source: DocumentSource::RuleExample {
                rule_id: rule_id.into(),
            },
            sentence,
        }
    }

    /// Create a document for a sentence taken from free text.
    pub fn text(offset: usize, sentence: TokenizedSentence) -> Self {
        CorpusDocument {
            source: DocumentSource::Text { offset },
            sentence,
        }
    }
}

/// Reference tokenizer for tests and demos.
///
/// Splits on Unicode word boundaries and additionally breaks apostrophes
/// out into their own tokens, so a possessive like `Bleed's` yields the
/// three tokens `Bleed`, `'`, `s`. Whitespace is skipped. Real deployments
/// feed sentences from their own tokenizer/tagger instead.
pub fn reference_tokenize(text: &str) -> TokenizedSentence {
    let mut tokens = Vec::new();
    for (start, segment) in text.split_word_bound_indices() {
        if segment.trim().is_empty() {
            continue;
        }
        // UAX-29 keeps word-internal apostrophes inside one segment.
        let mut offset = start;
        for piece in split_keep_apostrophes(segment) {
            tokens.push(Token::new(piece, offset, offset + piece.len()));
            offset += piece.len();
        }
    }
    TokenizedSentence::new(text, tokens)
}

fn split_keep_apostrophes(segment: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = segment;
    while let Some(pos) = rest.find(['\'', '\u{2019}']) {
        if pos > 0 {
            pieces.push(&rest[..pos]);
        }
        let quote_len = rest[pos..].chars().next().map(char::len_utf8).unwrap_or(1);
        pieces.push(&rest[pos..pos + quote_len]);
        rest = &rest[pos + quote_len..];
    }
    if !rest.is_empty() {
        pieces.push(rest);
    }
    pieces
}
