//! # Alauda
//!
//! Candidate retrieval and verification for pattern-rule search over
//! sentence corpora.
//!
//! Given a corpus of tokenized sentences and a structured text-matching
//! rule, alauda finds the sentences the rule would flag without running
//! the expensive full linguistic matcher against every sentence:
//!
//! 1. An inverted index is built over the corpus ([`index`]).
//! 2. The rule is translated into an index query; rules that are not fully
//!    expressible fall back to a relaxed, superset-producing query
//!    ([`query`]).
//! 3. Candidates are retrieved under a wall-clock budget ([`search`]).
//! 4. Every candidate is re-verified against the true matching predicate
//!    supplied by the caller, so the report contains exactly the sentences
//!    the rule really flags.
//!
//! Tokenization, rule parsing, and the full matcher itself live outside
//! this crate; see [`corpus`], [`pattern::RuleSource`], and
//! [`search::MatchPredicate`] for the hand-off points.

pub mod corpus;
mod error;
pub mod index;
pub mod pattern;
pub mod query;
pub mod search;

// Re-exports for the public API
pub use corpus::{CorpusDocument, DocumentSource, Token, TokenizedSentence, reference_tokenize};
pub use error::{AlaudaError, Result};
pub use index::{DocId, IndexWriter, SentenceIndex};
pub use pattern::{
    ExceptionClause, PatternRule, RuleSet, RuleSource, TokenElement, find_rule_by_id,
};
pub use query::{BuiltQuery, ElementClass, Query, build_query, classify};
pub use search::{
    Deadline, MatchPredicate, MatchRecord, MatchingSentence, Retrieval, SearchConfig,
    SearchResult, Searcher, Verification, retrieve, verify,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
