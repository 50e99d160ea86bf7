//! Coarse index queries produced from pattern rules.
//!
//! A query is the index-side approximation of a rule: either a strict
//! phrase over literal terms, or a relaxed form that only constrains which
//! terms must occur. Relaxed queries over-match on purpose; the verifier
//! settles the true semantics afterwards.

pub mod builder;

use std::fmt;

pub use builder::{BuiltQuery, ElementClass, build_query, classify};

/// A coarse index query, rebuilt per search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Literal terms that must appear as a contiguous ordered phrase.
    Phrase(Vec<String>),
    /// Terms that must all appear, in any order and position.
    Conjunction(Vec<String>),
    /// Matches every document in the index.
    MatchAll,
}

impl Query {
    /// Whether this query is a relaxed (superset-producing) form rather
    /// than an exact phrase.
    pub fn is_relaxed(&self) -> bool {
        !matches!(self, Query::Phrase(_))
    }

    /// The terms the query requires, in query order.
    pub fn terms(&self) -> &[String] {
        match self {
            Query::Phrase(terms) | Query::Conjunction(terms) => terms,
            Query::MatchAll => &[],
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Phrase(terms) => write!(f, "\"{}\"", terms.join(" ")),
            Query::Conjunction(terms) => {
                let parts: Vec<String> = terms.iter().map(|term| format!("+{term}")).collect();
                write!(f, "{}", parts.join(" "))
            }
            Query::MatchAll => write!(f, "*:*"),
        }
    }
}
